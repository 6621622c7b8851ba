//! Client entry point for an Ollama server.
//!
//! Keep the public surface small: a cloneable [`OllamaClient`] holding immutable
//! configuration and a transport, plus the resource facades it hands out.

pub mod builder;
pub mod core;

pub use builder::OllamaClientBuilder;
pub use core::OllamaClient;
