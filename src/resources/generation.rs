use super::dispatch;
use crate::requests::{ChatCompletionRequest, EmbeddingsRequest, GenerateCompletionRequest};
use crate::transport::{Response, Transport};
use crate::Result;
use std::sync::Arc;

/// Completion, chat and embeddings.
#[derive(Clone)]
pub struct GenerationResource {
    transport: Arc<dyn Transport>,
}

impl GenerationResource {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `POST /api/generate`; streams unless `stream(false)` was set.
    pub async fn generate(&self, request: &GenerateCompletionRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// `POST /api/chat`; streams unless `stream(false)` was set.
    pub async fn chat(&self, request: &ChatCompletionRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }

    /// `POST /api/embeddings`
    pub async fn embeddings(&self, request: &EmbeddingsRequest) -> Result<Response> {
        dispatch(self.transport.as_ref(), request).await
    }
}
