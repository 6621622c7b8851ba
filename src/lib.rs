//! # ollama-lib-rust
//!
//! Ollama HTTP API 的异步 Rust 客户端：类型化请求、空值省略的线格式与逐行 JSON 流式解码。
//!
//! Async client for the Ollama HTTP API: typed request builders, null-omitting
//! wire serialization and incremental decoding of newline-delimited JSON streams.
//!
//! ## Overview
//!
//! Every operation is a request builder that resolves into an immutable
//! [`requests::ApiRequest`] (method, path, JSON body). A resource facade hands
//! that descriptor to a [`transport::Transport`] and returns the raw
//! [`transport::Response`], which the caller decodes either as one buffered
//! object or as a lazy stream that ends at the server's terminal object.
//!
//! - **Wire forms**: unset fields never reach the wire; structured and raw JSON
//!   values mix freely (messages, options, tools, quantization)
//! - **Streaming-first**: generate, chat, create, pull and push stream by default
//! - **Fail early**: required fields are checked before any network I/O
//! - **Precise errors**: transport, malformed response, truncated stream,
//!   validation and server errors stay distinct
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use ollama_lib_rust::requests::GenerateCompletionRequest;
//! use ollama_lib_rust::types::GenerateResponse;
//! use ollama_lib_rust::OllamaClient;
//!
//! #[tokio::main]
//! async fn main() -> ollama_lib_rust::Result<()> {
//!     let client = OllamaClient::new("http://localhost:11434")?;
//!
//!     let request = GenerateCompletionRequest::new("llama3.2", "Why is the sky blue?");
//!     let mut stream = client
//!         .generation()
//!         .generate(&request)
//!         .await?
//!         .stream::<GenerateResponse>()
//!         .await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         print!("{}", chunk?.response);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`OllamaClient`] and its builder |
//! | [`config`] | Base URL, timeout, default headers |
//! | [`requests`] | One request builder per operation |
//! | [`resources`] | Facades grouping operations (api, generation, management) |
//! | [`transport`] | Transport seam, reqwest implementation, raw response |
//! | [`pipeline`] | Buffered and NDJSON streaming decoding |
//! | [`types`] | Value objects, wire-form contract, typed responses |

pub mod client;
pub mod config;
pub mod pipeline;
pub mod requests;
pub mod resources;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{OllamaClient, OllamaClientBuilder};
pub use config::ClientConfig;
pub use pipeline::{Completion, Reply, ResponseStream};
pub use requests::{ApiRequest, Endpoint};
pub use transport::{HttpTransport, Response, Transport};
pub use types::{
    message::{ChatMessage, ChatMessages, MessageRole},
    parameters::ModelParameters,
    quantization::QuantizationType,
    wire::{Param, WireForm},
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
