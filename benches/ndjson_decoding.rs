//! Benchmarks for NDJSON stream decoding
//!
//! This benchmark measures:
//! - Buffered single-object decoding
//! - Streamed decoding of a long generate response, whole-body and chunked
//! - Request body construction

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use futures::StreamExt;
use ollama_lib_rust::pipeline::{decode_buffered, NdjsonDecoder};
use ollama_lib_rust::requests::{ChatCompletionRequest, Endpoint};
use ollama_lib_rust::types::{ChatMessage, ChatMessages, GenerateResponse, ModelParameters};
use ollama_lib_rust::BoxStream;

const CHUNK_LINE: &str =
    r#"{"model":"llama3.2","created_at":"2025-02-11T10:00:00.000000Z","response":" token","done":false}"#;
const FINAL_LINE: &str = r#"{"model":"llama3.2","created_at":"2025-02-11T10:00:01.000000Z","response":"","done":true,"done_reason":"stop","total_duration":4935886791,"load_duration":534986708,"prompt_eval_count":26,"prompt_eval_duration":107345000,"eval_count":237,"eval_duration":4289432000}"#;

fn generate_body(lines: usize) -> String {
    let mut body = String::with_capacity((CHUNK_LINE.len() + 1) * (lines + 1));
    for _ in 0..lines {
        body.push_str(CHUNK_LINE);
        body.push('\n');
    }
    body.push_str(FINAL_LINE);
    body.push('\n');
    body
}

fn byte_stream(body: &str, chunk_size: usize) -> BoxStream<'static, Bytes> {
    let chunks: Vec<ollama_lib_rust::Result<Bytes>> = body
        .as_bytes()
        .chunks(chunk_size)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    Box::pin(futures::stream::iter(chunks))
}

fn bench_buffered(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffered_decoding");
    group.throughput(Throughput::Bytes(FINAL_LINE.len() as u64));
    group.bench_function("final_generate_object", |b| {
        b.iter(|| {
            let resp: GenerateResponse = decode_buffered(black_box(FINAL_LINE.as_bytes())).unwrap();
            black_box(resp);
        })
    });
    group.finish();
}

fn bench_streamed(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let body = generate_body(500);

    let mut group = c.benchmark_group("ndjson_stream");
    group.throughput(Throughput::Bytes(body.len() as u64));

    let cases = [
        ("single_chunk", body.len()),
        ("chunks_64b", 64),
        ("chunks_4k", 4096),
    ];
    for (name, chunk_size) in cases {
        group.bench_function(name, |b| {
            b.to_async(&rt).iter(|| async {
                let items: Vec<_> = NdjsonDecoder::new(200)
                    .decode_stream::<GenerateResponse>(byte_stream(&body, chunk_size))
                    .collect()
                    .await;
                assert_eq!(items.len(), 501);
                black_box(items);
            })
        });
    }
    group.finish();
}

fn bench_request_build(c: &mut Criterion) {
    let messages: ChatMessages = (0..32)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::user(format!("question {}", i))
            } else {
                ChatMessage::assistant(format!("answer {}", i))
            }
        })
        .collect();
    let request = ChatCompletionRequest::new("llama3.2", messages)
        .options(ModelParameters::new().temperature(0.7).num_ctx(8192).seed(42));

    c.bench_function("chat_request_32_messages", |b| {
        b.iter(|| black_box(request.to_request().unwrap()))
    });
}

criterion_group!(benches, bench_buffered, bench_streamed, bench_request_build);
criterion_main!(benches);
