//! Value objects and typed responses.
//!
//! Every request-side value object implements [`WireForm`]: it builds its full
//! JSON mapping and drops absent fields itself. Request builders compose these
//! wire forms without re-filtering them.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`wire`] | `WireForm`/`WireValue` contract, [`drop_absent`], [`Param`] |
//! | [`message`] | [`ChatMessage`], [`MessageRole`], [`ChatMessages`] |
//! | [`parameters`] | [`ModelParameters`] |
//! | [`quantization`] | [`QuantizationType`] |
//! | [`tool`] | Tool definitions and tool calls |
//! | [`response`] | Typed response bodies |
//! | [`digest`] | `sha256:<hex>` blob digests |
//!
//! ```rust
//! use ollama_lib_rust::types::{ChatMessage, ChatMessages, ModelParameters, WireForm};
//!
//! let messages = ChatMessages::new()
//!     .with(ChatMessage::system("Answer briefly."))
//!     .with(ChatMessage::user("Why is the sky blue?"));
//! assert_eq!(messages.normalize().len(), 2);
//!
//! let options = ModelParameters::new().temperature(0.2).seed(7);
//! assert_eq!(options.to_wire_form().len(), 2);
//! ```

pub mod digest;
pub mod message;
pub mod parameters;
pub mod quantization;
pub mod response;
pub mod tool;
pub mod wire;

pub use digest::{file_digest, sha256_digest};
pub use message::{ChatMessage, ChatMessages, MessageEntry, MessageRole, Role};
pub use parameters::ModelParameters;
pub use quantization::QuantizationType;
pub use response::{
    ChatResponse, CompletionStats, EmbeddingsResponse, GenerateResponse, ModelDetails, ModelInfo,
    ModelList, ProgressResponse, RunningModel, RunningModelList, ShowModelResponse,
    VersionResponse,
};
pub use tool::{FunctionDefinition, ToolCall, ToolCallFunction, ToolDefinition};
pub use wire::{drop_absent, Param, WireForm, WireValue};
