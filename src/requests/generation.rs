//! Content generation: completion, chat and embeddings.

use super::{require_non_empty, streams_by_default, ApiRequest, Endpoint};
use crate::types::wire::{drop_absent, opt, opt_wire};
use crate::types::{ChatMessages, ModelParameters, Param, ToolDefinition, WireValue};
use crate::Result;
use reqwest::Method;
use serde_json::Value;

/// `POST /api/generate`
#[derive(Debug, Clone)]
pub struct GenerateCompletionRequest {
    pub model: String,
    pub prompt: String,
    /// Text after the model response
    pub suffix: Option<String>,
    /// Base64-encoded images for multimodal models
    pub images: Option<Vec<String>>,
    /// `"json"` or a JSON schema
    pub format: Option<Value>,
    pub options: Option<Param<ModelParameters>>,
    pub system: Option<String>,
    pub template: Option<String>,
    pub stream: Option<bool>,
    /// Skip prompt templating entirely
    pub raw: Option<bool>,
    /// How long the model stays loaded after the request (e.g. `"5m"`, `0`)
    pub keep_alive: Option<Value>,
}

impl GenerateCompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            suffix: None,
            images: None,
            format: None,
            options: None,
            system: None,
            template: None,
            stream: None,
            raw: None,
            keep_alive: None,
        }
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn format(mut self, format: impl Into<Value>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn options(mut self, options: impl Into<Param<ModelParameters>>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn keep_alive(mut self, keep_alive: impl Into<Value>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }
}

impl Endpoint for GenerateCompletionRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([
            ("model", Value::String(self.model.clone())),
            ("prompt", Value::String(self.prompt.clone())),
            ("suffix", opt(self.suffix.clone())),
            ("images", opt_wire(self.images.as_ref())),
            ("format", opt(self.format.clone())),
            ("options", opt_wire(self.options.as_ref())),
            ("system", opt(self.system.clone())),
            ("template", opt(self.template.clone())),
            ("stream", opt(self.stream)),
            ("raw", opt(self.raw)),
            ("keep_alive", opt(self.keep_alive.clone())),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "generate"])
            .with_body(body)
            .with_streaming(streams_by_default(self.stream)))
    }
}

/// `POST /api/chat`
#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: ChatMessages,
    pub tools: Option<Vec<Param<ToolDefinition>>>,
    pub format: Option<Value>,
    pub options: Option<Param<ModelParameters>>,
    pub stream: Option<bool>,
    pub keep_alive: Option<Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: impl Into<ChatMessages>) -> Self {
        Self {
            model: model.into(),
            messages: messages.into(),
            tools: None,
            format: None,
            options: None,
            stream: None,
            keep_alive: None,
        }
    }

    pub fn tools<I, T>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Param<ToolDefinition>>,
    {
        self.tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    pub fn format(mut self, format: impl Into<Value>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn options(mut self, options: impl Into<Param<ModelParameters>>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn keep_alive(mut self, keep_alive: impl Into<Value>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }
}

impl Endpoint for ChatCompletionRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([
            ("model", Value::String(self.model.clone())),
            ("messages", self.messages.to_wire_value()),
            ("tools", opt_wire(self.tools.as_ref())),
            ("format", opt(self.format.clone())),
            ("options", opt_wire(self.options.as_ref())),
            ("stream", opt(self.stream)),
            ("keep_alive", opt(self.keep_alive.clone())),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "chat"])
            .with_body(body)
            .with_streaming(streams_by_default(self.stream)))
    }
}

/// `POST /api/embeddings`
#[derive(Debug, Clone)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub prompt: String,
    /// Truncate input to the context length instead of failing
    pub truncate: Option<bool>,
    pub options: Option<Param<ModelParameters>>,
    pub keep_alive: Option<Value>,
}

impl EmbeddingsRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            truncate: None,
            options: None,
            keep_alive: None,
        }
    }

    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = Some(truncate);
        self
    }

    pub fn options(mut self, options: impl Into<Param<ModelParameters>>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn keep_alive(mut self, keep_alive: impl Into<Value>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }
}

impl Endpoint for EmbeddingsRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([
            ("model", Value::String(self.model.clone())),
            ("prompt", Value::String(self.prompt.clone())),
            ("truncate", opt(self.truncate)),
            ("options", opt_wire(self.options.as_ref())),
            ("keep_alive", opt(self.keep_alive.clone())),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "embeddings"]).with_body(body))
    }
}
