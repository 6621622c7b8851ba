//! Model lifecycle: listing, creation, copying, deletion, registry transfer,
//! inspection, blob checks and memory residency.

use super::{require_non_empty, streams_by_default, ApiRequest, Endpoint};
use crate::types::wire::{drop_absent, opt, opt_wire};
use crate::types::{ChatMessages, ModelParameters, Param, QuantizationType};
use crate::{Error, ErrorContext, Result};
use reqwest::Method;
use serde_json::{Map, Value};

/// `GET /api/tags`
#[derive(Debug, Clone, Copy, Default)]
pub struct ListLocalModelsRequest;

impl Endpoint for ListLocalModelsRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::new(Method::GET, ["api", "tags"]))
    }
}

/// `GET /api/ps`
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRunningModelsRequest;

impl Endpoint for ListRunningModelsRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::new(Method::GET, ["api", "ps"]))
    }
}

/// `HEAD /api/blobs/{digest}`
///
/// The server answers 200 when the blob exists and 404 otherwise; the digest is
/// forwarded as given and validated by the server.
#[derive(Debug, Clone)]
pub struct CheckBlobExistsRequest {
    pub digest: String,
}

impl CheckBlobExistsRequest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
        }
    }
}

impl Endpoint for CheckBlobExistsRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("digest", &self.digest)?;
        Ok(ApiRequest::new(
            Method::HEAD,
            ["api".to_string(), "blobs".to_string(), self.digest.clone()],
        ))
    }
}

/// `POST /api/create`
///
/// Creates a model from another model, a safetensors directory or a GGUF file.
/// Files and adapters map file names to blob digests that must already exist
/// on the server.
#[derive(Debug, Clone)]
pub struct CreateModelRequest {
    pub model: String,
    pub from: Option<String>,
    pub files: Option<Map<String, Value>>,
    pub adapters: Option<Map<String, Value>>,
    pub template: Option<String>,
    /// A string or a list of strings
    pub license: Option<Value>,
    pub system: Option<String>,
    pub parameters: Option<Param<ModelParameters>>,
    pub messages: Option<ChatMessages>,
    pub stream: Option<bool>,
    pub quantize: Option<Param<QuantizationType>>,
}

impl CreateModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            from: None,
            files: None,
            adapters: None,
            template: None,
            license: None,
            system: None,
            parameters: None,
            messages: None,
            stream: None,
            quantize: None,
        }
    }

    pub fn from_model(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Add one file name → blob digest entry.
    pub fn file(mut self, name: impl Into<String>, digest: impl Into<String>) -> Self {
        self.files
            .get_or_insert_with(Map::new)
            .insert(name.into(), Value::String(digest.into()));
        self
    }

    /// Add one LoRA adapter file name → blob digest entry.
    pub fn adapter(mut self, name: impl Into<String>, digest: impl Into<String>) -> Self {
        self.adapters
            .get_or_insert_with(Map::new)
            .insert(name.into(), Value::String(digest.into()));
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn license(mut self, license: impl Into<Value>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn parameters(mut self, parameters: impl Into<Param<ModelParameters>>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    pub fn messages(mut self, messages: impl Into<ChatMessages>) -> Self {
        self.messages = Some(messages.into());
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn quantize(mut self, quantize: QuantizationType) -> Self {
        self.quantize = Some(Param::Structured(quantize));
        self
    }

    /// Parse a quantization code against the known set.
    pub fn quantize_str(mut self, quantize: &str) -> Result<Self> {
        let parsed = quantize.parse::<QuantizationType>().map_err(|e| match e {
            Error::Validation { message, context } => Error::Validation {
                message,
                context: ErrorContext {
                    field_path: Some("create.quantize".to_string()),
                    ..context
                },
            },
            other => other,
        })?;
        self.quantize = Some(Param::Structured(parsed));
        Ok(self)
    }

    /// Forward a quantization value unchecked.
    pub fn quantize_raw(mut self, quantize: impl Into<Value>) -> Self {
        self.quantize = Some(Param::raw(quantize));
        self
    }
}

impl Endpoint for CreateModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([
            ("model", Value::String(self.model.clone())),
            ("from", opt(self.from.clone())),
            ("files", opt_wire(self.files.as_ref())),
            ("adapters", opt_wire(self.adapters.as_ref())),
            ("template", opt(self.template.clone())),
            ("license", opt(self.license.clone())),
            ("system", opt(self.system.clone())),
            ("parameters", opt_wire(self.parameters.as_ref())),
            ("messages", opt_wire(self.messages.as_ref())),
            ("stream", opt(self.stream)),
            ("quantize", opt_wire(self.quantize.as_ref())),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "create"])
            .with_body(body)
            .with_streaming(streams_by_default(self.stream)))
    }
}

/// `POST /api/copy`
#[derive(Debug, Clone)]
pub struct CopyModelRequest {
    pub source: String,
    pub destination: String,
}

impl CopyModelRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl Endpoint for CopyModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("source", &self.source)?;
        require_non_empty("destination", &self.destination)?;
        let body = drop_absent([
            ("source", Value::String(self.source.clone())),
            ("destination", Value::String(self.destination.clone())),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "copy"]).with_body(body))
    }
}

/// `DELETE /api/delete`
#[derive(Debug, Clone)]
pub struct DeleteModelRequest {
    pub model: String,
}

impl DeleteModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl Endpoint for DeleteModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([("model", Value::String(self.model.clone()))]);
        Ok(ApiRequest::new(Method::DELETE, ["api", "delete"]).with_body(body))
    }
}

/// `POST /api/pull`
///
/// Cancelled pulls resume where they left off on the server side.
#[derive(Debug, Clone)]
pub struct PullModelRequest {
    pub model: String,
    /// Allow insecure connections to the library
    pub insecure: Option<bool>,
    pub stream: Option<bool>,
}

impl PullModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            insecure: None,
            stream: None,
        }
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }
}

impl Endpoint for PullModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        Ok(ApiRequest::new(Method::POST, ["api", "pull"])
            .with_body(transfer_body(&self.model, self.insecure, self.stream))
            .with_streaming(streams_by_default(self.stream)))
    }
}

/// `POST /api/push`
///
/// The model name takes the form `<namespace>/<model>:<tag>`.
#[derive(Debug, Clone)]
pub struct PushModelRequest {
    pub model: String,
    pub insecure: Option<bool>,
    pub stream: Option<bool>,
}

impl PushModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            insecure: None,
            stream: None,
        }
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }
}

impl Endpoint for PushModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        Ok(ApiRequest::new(Method::POST, ["api", "push"])
            .with_body(transfer_body(&self.model, self.insecure, self.stream))
            .with_streaming(streams_by_default(self.stream)))
    }
}

fn transfer_body(model: &str, insecure: Option<bool>, stream: Option<bool>) -> Map<String, Value> {
    drop_absent([
        ("model", Value::String(model.to_string())),
        ("insecure", opt(insecure)),
        ("stream", opt(stream)),
    ])
}

/// `POST /api/show`
#[derive(Debug, Clone)]
pub struct ShowModelRequest {
    pub model: String,
    /// Return full data for verbose response fields
    pub verbose: Option<bool>,
}

impl ShowModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            verbose: None,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }
}

impl Endpoint for ShowModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([
            ("model", Value::String(self.model.clone())),
            ("verbose", opt(self.verbose)),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "show"]).with_body(body))
    }
}

/// Load a model into memory: `POST /api/generate` without a prompt.
#[derive(Debug, Clone)]
pub struct LoadModelRequest {
    pub model: String,
}

impl LoadModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl Endpoint for LoadModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([("model", Value::String(self.model.clone()))]);
        Ok(ApiRequest::new(Method::POST, ["api", "generate"]).with_body(body))
    }
}

/// Unload a model from memory: `POST /api/generate` with `keep_alive: 0`.
#[derive(Debug, Clone)]
pub struct UnloadModelRequest {
    pub model: String,
}

impl UnloadModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl Endpoint for UnloadModelRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        require_non_empty("model", &self.model)?;
        let body = drop_absent([
            ("model", Value::String(self.model.clone())),
            ("keep_alive", Value::from(0)),
        ]);
        Ok(ApiRequest::new(Method::POST, ["api", "generate"]).with_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use serde_json::json;

    fn body_of(endpoint: &impl Endpoint) -> Value {
        Value::Object(endpoint.to_request().unwrap().body().unwrap().clone())
    }

    #[test]
    fn list_endpoints_are_bodyless_gets() {
        for (req, path) in [
            (ListLocalModelsRequest.to_request().unwrap(), "/api/tags"),
            (ListRunningModelsRequest.to_request().unwrap(), "/api/ps"),
        ] {
            assert_eq!(req.method(), &Method::GET);
            assert_eq!(req.path(), path);
            assert!(req.body().is_none());
        }
    }

    #[test]
    fn blob_check_embeds_digest_in_path() {
        let req = CheckBlobExistsRequest::new("sha256:29fdb92e57cf")
            .to_request()
            .unwrap();
        assert_eq!(req.method(), &Method::HEAD);
        assert_eq!(req.path(), "/api/blobs/sha256:29fdb92e57cf");
        assert!(req.body().is_none());
    }

    #[test]
    fn create_from_existing_model() {
        let req = CreateModelRequest::new("mario")
            .from_model("llama3.2")
            .system("You are Mario from Super Mario Bros.")
            .to_request()
            .unwrap();
        assert!(req.is_streaming());
        assert_eq!(
            Value::Object(req.body().unwrap().clone()),
            json!({
                "model": "mario",
                "from": "llama3.2",
                "system": "You are Mario from Super Mario Bros."
            })
        );
    }

    #[test]
    fn create_resolves_every_structured_field() {
        let req = CreateModelRequest::new("custom")
            .file("model.gguf", "sha256:abc")
            .adapter("lora.gguf", "sha256:def")
            .parameters(ModelParameters::new().num_ctx(8192))
            .messages(vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")])
            .quantize(QuantizationType::Q4KM)
            .stream(false);
        let body = body_of(&req);
        assert_eq!(body["files"], json!({"model.gguf": "sha256:abc"}));
        assert_eq!(body["adapters"], json!({"lora.gguf": "sha256:def"}));
        assert_eq!(body["parameters"], json!({"num_ctx": 8192}));
        assert_eq!(
            body["messages"],
            json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"}
            ])
        );
        assert_eq!(body["quantize"], json!("q4_K_M"));
        assert!(!req.to_request().unwrap().is_streaming());
    }

    #[test]
    fn create_accepts_raw_parameters_string() {
        let req = CreateModelRequest::new("m")
            .parameters(Param::<ModelParameters>::raw("temperature 0.5"));
        assert_eq!(body_of(&req)["parameters"], json!("temperature 0.5"));
    }

    #[test]
    fn create_omits_messages_when_unset() {
        let body = body_of(&CreateModelRequest::new("m"));
        assert_eq!(body, json!({"model": "m"}));
    }

    #[test]
    fn bogus_quantization_is_rejected_without_escape_hatch() {
        let err = CreateModelRequest::new("m").quantize_str("bogus").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("create.quantize")
        );
    }

    #[test]
    fn raw_quantization_escape_hatch_is_unchecked() {
        let req = CreateModelRequest::new("m").quantize_raw("bogus");
        assert_eq!(body_of(&req)["quantize"], json!("bogus"));
    }

    #[test]
    fn copy_and_delete_bodies() {
        assert_eq!(
            body_of(&CopyModelRequest::new("llama3.2", "llama3-backup")),
            json!({"source": "llama3.2", "destination": "llama3-backup"})
        );
        let delete = DeleteModelRequest::new("llama3:13b").to_request().unwrap();
        assert_eq!(delete.method(), &Method::DELETE);
        assert_eq!(
            Value::Object(delete.body().unwrap().clone()),
            json!({"model": "llama3:13b"})
        );
    }

    #[test]
    fn copy_requires_both_names() {
        assert!(CopyModelRequest::new("a", "").to_request().unwrap_err().is_validation());
        assert!(CopyModelRequest::new("", "b").to_request().unwrap_err().is_validation());
    }

    #[test]
    fn pull_and_push_stream_unless_disabled() {
        let pull = PullModelRequest::new("llama3.2").insecure(true).to_request().unwrap();
        assert!(pull.is_streaming());
        assert_eq!(pull.path(), "/api/pull");
        assert_eq!(
            Value::Object(pull.body().unwrap().clone()),
            json!({"model": "llama3.2", "insecure": true})
        );

        let push = PushModelRequest::new("me/model:latest").stream(false).to_request().unwrap();
        assert!(!push.is_streaming());
        assert_eq!(push.path(), "/api/push");
    }

    #[test]
    fn show_includes_verbose_only_when_set() {
        assert_eq!(body_of(&ShowModelRequest::new("m")), json!({"model": "m"}));
        assert_eq!(
            body_of(&ShowModelRequest::new("m").verbose(true)),
            json!({"model": "m", "verbose": true})
        );
    }

    #[test]
    fn load_and_unload_reuse_generate() {
        let load = LoadModelRequest::new("llama3.2").to_request().unwrap();
        let unload = UnloadModelRequest::new("llama3.2").to_request().unwrap();
        assert_eq!(load.path(), "/api/generate");
        assert_eq!(unload.path(), "/api/generate");
        assert!(!load.is_streaming());
        assert!(!unload.is_streaming());
        assert_eq!(
            Value::Object(load.body().unwrap().clone()),
            json!({"model": "llama3.2"})
        );
        assert_eq!(
            Value::Object(unload.body().unwrap().clone()),
            json!({"model": "llama3.2", "keep_alive": 0})
        );
    }
}
