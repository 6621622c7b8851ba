//! Typed response bodies.
//!
//! Fields the server always sends are required, so a body missing them fails
//! to decode as a malformed response instead of producing a half-filled value.

use super::message::ChatMessage;
use crate::pipeline::Completion;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timing and token statistics, present only on the terminal object of a stream
/// (or on a buffered response).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionStats {
    /// Nanoseconds
    pub total_duration: Option<u64>,
    pub load_duration: Option<u64>,
    pub prompt_eval_count: Option<u64>,
    pub prompt_eval_duration: Option<u64>,
    pub eval_count: Option<u64>,
    pub eval_duration: Option<u64>,
}

impl CompletionStats {
    /// Generated tokens per second, when the server reported enough to compute it.
    pub fn tokens_per_second(&self) -> Option<f64> {
        match (self.eval_count, self.eval_duration) {
            (Some(count), Some(ns)) if ns > 0 => Some(count as f64 / (ns as f64 / 1e9)),
            _ => None,
        }
    }
}

/// `/api/generate` chunk or buffered result. Also returned by load/unload.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub thinking: Option<String>,
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Conversation encoding to send back for short-term memory.
    #[serde(default)]
    pub context: Option<Vec<i64>>,
    #[serde(flatten)]
    pub stats: CompletionStats,
}

impl Completion for GenerateResponse {
    fn is_done(&self) -> bool {
        self.done
    }
}

/// `/api/chat` chunk or buffered result.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub message: Option<ChatMessage>,
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(flatten)]
    pub stats: CompletionStats,
}

impl ChatResponse {
    /// Text carried by this chunk, empty when there is none.
    pub fn content(&self) -> &str {
        self.message.as_ref().map(|m| m.content.as_str()).unwrap_or("")
    }
}

impl Completion for ChatResponse {
    fn is_done(&self) -> bool {
        self.done
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsResponse {
    pub embedding: Vec<f64>,
}

/// Progress update from `/api/pull`, `/api/push` and `/api/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressResponse {
    pub status: String,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub completed: Option<u64>,
}

impl ProgressResponse {
    /// Fraction in `[0, 1]` for layer transfers, `None` otherwise.
    pub fn fraction(&self) -> Option<f64> {
        match (self.completed, self.total) {
            (Some(done), Some(total)) if total > 0 => Some((done as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}

impl Completion for ProgressResponse {
    fn is_done(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(default)]
    pub parent_model: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub families: Option<Vec<String>>,
    #[serde(default)]
    pub parameter_size: Option<String>,
    #[serde(default)]
    pub quantization_level: Option<String>,
}

/// Entry of `/api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub details: Option<ModelDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    pub models: Vec<ModelInfo>,
}

/// Entry of `/api/ps`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunningModel {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub details: Option<ModelDetails>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub size_vram: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunningModelList {
    pub models: Vec<RunningModel>,
}

/// `/api/show` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowModelResponse {
    #[serde(default)]
    pub modelfile: Option<String>,
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub details: Option<ModelDetails>,
    #[serde(default)]
    pub model_info: Option<Map<String, Value>>,
    #[serde(default)]
    pub capabilities: Option<Vec<String>>,
    #[serde(default)]
    pub modified_at: Option<String>,
}
