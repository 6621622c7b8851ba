//! Request builders: one per API operation.
//!
//! Each builder owns its endpoint path, HTTP method and body rule, and turns
//! into an immutable [`ApiRequest`] descriptor through [`Endpoint::to_request`].
//! Required fields are checked there, before any network I/O.
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`api`] | version |
//! | [`generation`] | generate, chat, embeddings |
//! | [`management`] | list, ps, create, copy, delete, pull, push, show, blob exists, load, unload |

pub mod api;
pub mod generation;
pub mod management;

pub use api::GetVersionRequest;
pub use generation::{ChatCompletionRequest, EmbeddingsRequest, GenerateCompletionRequest};
pub use management::{
    CheckBlobExistsRequest, CopyModelRequest, CreateModelRequest, DeleteModelRequest,
    ListLocalModelsRequest, ListRunningModelsRequest, LoadModelRequest, PullModelRequest,
    PushModelRequest, ShowModelRequest, UnloadModelRequest,
};

use crate::{Error, ErrorContext, Result};
use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

/// Immutable description of one HTTP exchange: method, path and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    body: Option<Map<String, Value>>,
    streaming: bool,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
            streaming: false,
        }
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark the response as newline-delimited JSON to be consumed incrementally.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Unencoded path, for display and logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Join the path onto `base`, percent-encoding every segment.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::configuration_with_context(
                    "base URL cannot carry a path",
                    ErrorContext::new()
                        .with_field_path("base_url")
                        .with_details(base.to_string()),
                )
            })?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
        }
        Ok(url)
    }
}

/// Implemented by every request builder.
pub trait Endpoint {
    fn to_request(&self) -> Result<ApiRequest>;
}

impl Endpoint for ApiRequest {
    fn to_request(&self) -> Result<ApiRequest> {
        Ok(self.clone())
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new()
                .with_field_path(field)
                .with_source("request_builder"),
        ));
    }
    Ok(())
}

/// Stream-capable endpoints stream unless the caller opts out.
pub(crate) fn streams_by_default(stream: Option<bool>) -> bool {
    stream.unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_onto_base_with_prefix() {
        let req = ApiRequest::new(Method::GET, ["api", "tags"]);
        let base = Url::parse("http://localhost:11434/ollama/").unwrap();
        assert_eq!(
            req.url(&base).unwrap().as_str(),
            "http://localhost:11434/ollama/api/tags"
        );
    }

    #[test]
    fn url_segments_are_percent_encoded() {
        let req = ApiRequest::new(Method::HEAD, ["api", "blobs", "sha256:ab/../c?d #"]);
        let base = Url::parse("http://localhost:11434").unwrap();
        let url = req.url(&base).unwrap();
        assert_eq!(url.path(), "/api/blobs/sha256:ab%2F..%2Fc%3Fd%20%23");
        assert!(url.query().is_none());
    }

    #[test]
    fn cannot_be_a_base_url_is_a_configuration_error() {
        let req = ApiRequest::new(Method::GET, ["api", "version"]);
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            req.url(&base).unwrap_err(),
            Error::Configuration { .. }
        ));
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let err = require_non_empty("model", "  ").unwrap_err();
        assert!(err.is_validation());
    }
}
