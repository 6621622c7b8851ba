//! Streaming responses end to end: NDJSON framing over real HTTP, terminal
//! detection and the failure kinds of a broken stream.

mod integration;

use futures::StreamExt;
use integration::mock_server::MockServerFixture;
use ollama_lib_rust::requests::{
    ChatCompletionRequest, CreateModelRequest, GenerateCompletionRequest, PullModelRequest,
};
use ollama_lib_rust::types::{
    ChatMessage, ChatResponse, GenerateResponse, ProgressResponse, QuantizationType,
};
use ollama_lib_rust::Error;

#[tokio::test]
async fn chat_stream_yields_every_chunk_then_stops() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_ndjson(
            "/api/chat",
            &[
                r#"{"model":"llama3.2","message":{"role":"assistant","content":"The"},"done":false}"#,
                r#"{"model":"llama3.2","message":{"role":"assistant","content":" sky"},"done":false}"#,
                r#"{"model":"llama3.2","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop","eval_count":2}"#,
            ],
        )
        .await;

    let request = ChatCompletionRequest::new("llama3.2", ChatMessage::user("Why is the sky blue?"));
    let mut stream = fixture
        .client()
        .generation()
        .chat(&request)
        .await
        .unwrap()
        .stream::<ChatResponse>()
        .await
        .unwrap();

    let mut text = String::new();
    let mut chunks = 0;
    let mut last_done = false;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.unwrap();
        text.push_str(chunk.content());
        chunks += 1;
        last_done = chunk.done;
    }

    assert_eq!(chunks, 3);
    assert!(last_done);
    assert_eq!(text, "The sky");
}

#[tokio::test]
async fn streamed_reply_final_chunk_carries_stats() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_ndjson(
            "/api/generate",
            &[
                r#"{"model":"m","response":"Hi","done":false}"#,
                r#"{"model":"m","response":"","done":true,"eval_count":10,"eval_duration":500000000}"#,
            ],
        )
        .await;

    let reply = fixture
        .client()
        .generation()
        .generate(&GenerateCompletionRequest::new("m", "hello"))
        .await
        .unwrap()
        .reply::<GenerateResponse>()
        .await
        .unwrap();

    assert!(reply.is_streamed());
    let last = reply.final_chunk().await.unwrap();
    assert!(last.done);
    assert_eq!(last.stats.tokens_per_second(), Some(20.0));
}

#[tokio::test]
async fn pull_progress_ends_on_success() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_ndjson(
            "/api/pull",
            &[
                r#"{"status":"pulling manifest"}"#,
                r#"{"status":"pulling 6a0746a1ec1a","digest":"sha256:6a0746a1ec1a","total":2000,"completed":1000}"#,
                r#"{"status":"verifying sha256 digest"}"#,
                r#"{"status":"success"}"#,
            ],
        )
        .await;

    let updates = fixture
        .client()
        .management()
        .pull(&PullModelRequest::new("llama3.2"))
        .await
        .unwrap()
        .stream::<ProgressResponse>()
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(updates.len(), 4);
    assert_eq!(updates[1].fraction(), Some(0.5));
    assert_eq!(updates[3].status, "success");
}

#[tokio::test]
async fn create_streams_progress_by_default() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/create")
        .match_body(mockito::Matcher::Exact(
            r#"{"model":"mario","from":"llama3.2","system":"You are Mario.","quantize":"q4_K_M"}"#.to_string(),
        ))
        .with_status(200)
        .with_body("{\"status\":\"reading model metadata\"}\n{\"status\":\"success\"}\n")
        .create_async()
        .await;

    let request = CreateModelRequest::new("mario")
        .from_model("llama3.2")
        .system("You are Mario.")
        .quantize(QuantizationType::Q4KM);
    let last = fixture
        .client()
        .management()
        .create(&request)
        .await
        .unwrap()
        .reply::<ProgressResponse>()
        .await
        .unwrap()
        .final_chunk()
        .await
        .unwrap();

    assert_eq!(last.status, "success");
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_closed_mid_object_is_incomplete() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_raw_ndjson(
            "/api/generate",
            "{\"model\":\"m\",\"response\":\"Hi\",\"done\":false}\n{\"model\":\"m\",\"resp",
        )
        .await;

    let items: Vec<_> = fixture
        .client()
        .generation()
        .generate(&GenerateCompletionRequest::new("m", "hello"))
        .await
        .unwrap()
        .stream::<GenerateResponse>()
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().response, "Hi");
    match &items[1] {
        Err(Error::IncompleteStream { received }) => assert_eq!(*received, 1),
        other => panic!("expected incomplete stream, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_line_aborts_the_stream() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_raw_ndjson(
            "/api/generate",
            "{\"model\":\"m\",\"response\":\"Hi\",\"done\":false}\n<html>oops</html>\n{\"model\":\"m\",\"response\":\"\",\"done\":true}\n",
        )
        .await;

    let items: Vec<_> = fixture
        .client()
        .generation()
        .generate(&GenerateCompletionRequest::new("m", "hello"))
        .await
        .unwrap()
        .stream::<GenerateResponse>()
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert!(matches!(items[1], Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn in_band_error_line_is_reported_as_remote() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_ndjson("/api/pull", &[r#"{"error":"pull model manifest: file does not exist"}"#])
        .await;

    let mut stream = fixture
        .client()
        .management()
        .pull(&PullModelRequest::new("does-not-exist"))
        .await
        .unwrap()
        .stream::<ProgressResponse>()
        .await
        .unwrap();

    match stream.next().await {
        Some(Err(Error::Remote { status, message })) => {
            assert_eq!(status, 200);
            assert!(message.contains("file does not exist"));
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    assert!(stream.next().await.is_none());
}
