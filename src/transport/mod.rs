//! 传输层：执行请求描述并交回原始响应。
//!
//! The [`Transport`] trait is the only seam between request construction and
//! the network. Facades hand it an [`ApiRequest`] and return its [`Response`]
//! untouched; decoding into typed objects happens on the response.

pub mod http;

pub use http::HttpTransport;

use crate::pipeline::{decode_buffered, Completion, NdjsonDecoder, Reply, ResponseStream};
use crate::requests::ApiRequest;
use crate::{BoxStream, Error, Result};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Executes one request descriptor.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Response>;
}

/// Raw HTTP response: status, headers and a lazily read body.
///
/// The streaming flag comes from the request that produced it and selects how
/// [`Response::reply`] decodes the body.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: BoxStream<'static, Bytes>,
    streaming: bool,
}

impl Response {
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: BoxStream<'static, Bytes>,
        streaming: bool,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            streaming,
        }
    }

    /// A response whose whole body is already in memory.
    pub fn from_bytes(status: StatusCode, body: impl Into<Bytes>, streaming: bool) -> Self {
        let body = body.into();
        Self::new(
            status,
            HeaderMap::new(),
            Box::pin(futures::stream::once(async move { Ok(body) })),
            streaming,
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Read the whole body into memory.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// The body as it arrives, chunk by chunk.
    pub fn bytes_stream(self) -> BoxStream<'static, Bytes> {
        self.body
    }

    /// Turn a non-2xx status into [`Error::Remote`], reading the server's
    /// `{"error": "..."}` message when there is one.
    pub async fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }
        let status = self.status;
        let body = self.bytes().await?;
        let message = serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(&body).trim().to_string();
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string()
                } else {
                    text
                }
            });
        Err(Error::Remote {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a single JSON object from the whole body.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.error_for_status().await?.bytes().await?;
        decode_buffered(&body)
    }

    /// Decode the body as newline-delimited JSON, item by item.
    pub async fn stream<T>(self) -> Result<ResponseStream<T>>
    where
        T: DeserializeOwned + Completion + Send + 'static,
    {
        let resp = self.error_for_status().await?;
        let decoder = NdjsonDecoder::new(resp.status.as_u16());
        Ok(ResponseStream::new(decoder.decode_stream(resp.body)))
    }

    /// Decode according to the request's stream flag.
    pub async fn reply<T>(self) -> Result<Reply<T>>
    where
        T: DeserializeOwned + Completion + Send + 'static,
    {
        if self.streaming {
            Ok(Reply::Streamed(self.stream().await?))
        } else {
            Ok(Reply::Buffered(self.json().await?))
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("streaming", &self.streaming)
            .finish_non_exhaustive()
    }
}
