//! 响应解码模块：缓冲响应与逐行 JSON 流。
//!
//! Response decoding: buffered bodies and newline-delimited JSON streams.
//!
//! ```text
//! Bytes chunks → line framing → per-line JSON → typed item → terminal check
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`decode::NdjsonDecoder`] | Incremental line decoder that stops at the terminal object |
//! | [`decode::decode_buffered`] | Single-object decoding of a fully read body |
//! | [`ResponseStream`] | Typed, single-consumer item stream owning the connection |
//! | [`Reply`] | Buffered-or-streamed result with one consumption shape |

pub mod decode;

use crate::{BoxStream, Error, Result};
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::pin::Pin;
use std::task::{Context, Poll};

pub use decode::{decode_buffered, NdjsonDecoder, DEFAULT_MAX_LINE_LEN};

/// Recognizes the terminal object of a stream.
pub trait Completion {
    fn is_done(&self) -> bool;
}

/// Untyped objects finish on `done: true` or, for progress streams,
/// `status: "success"`.
impl Completion for Value {
    fn is_done(&self) -> bool {
        self.get("done").and_then(Value::as_bool) == Some(true)
            || self.get("status").and_then(Value::as_str) == Some("success")
    }
}

/// Lazily decoded items of a streaming response.
///
/// Dropping it drops the underlying body, which closes the connection.
pub struct ResponseStream<T> {
    inner: BoxStream<'static, T>,
}

impl<T: Send + 'static> ResponseStream<T> {
    pub fn new(inner: BoxStream<'static, T>) -> Self {
        Self { inner }
    }

    /// Drain the stream, returning the terminal object.
    pub async fn final_chunk(mut self) -> Result<T> {
        let mut last = None;
        while let Some(item) = self.inner.next().await {
            last = Some(item?);
        }
        last.ok_or(Error::IncompleteStream { received: 0 })
    }

    /// Drain the stream into a vector, failing on the first error.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.inner.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

impl<T> Stream for ResponseStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl<T> std::fmt::Debug for ResponseStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream").finish_non_exhaustive()
    }
}

/// Outcome of a stream-capable operation, chosen by the request's `stream` flag.
#[derive(Debug)]
pub enum Reply<T> {
    Buffered(T),
    Streamed(ResponseStream<T>),
}

impl<T: Send + 'static> Reply<T> {
    pub fn is_streamed(&self) -> bool {
        matches!(self, Reply::Streamed(_))
    }

    /// View either mode as a stream; a buffered reply yields its single object.
    pub fn into_stream(self) -> ResponseStream<T> {
        match self {
            Reply::Buffered(item) => {
                ResponseStream::new(Box::pin(futures::stream::once(async move { Ok(item) })))
            }
            Reply::Streamed(stream) => stream,
        }
    }

    /// The buffered object, or the terminal object of the stream.
    pub async fn final_chunk(self) -> Result<T> {
        match self {
            Reply::Buffered(item) => Ok(item),
            Reply::Streamed(stream) => stream.final_chunk().await,
        }
    }
}
