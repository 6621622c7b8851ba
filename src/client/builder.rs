use crate::client::core::OllamaClient;
use crate::config::{parse_base_url, ClientConfig, DEFAULT_BASE_URL};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Unset values fall back to the environment, then to defaults:
/// - `OLLAMA_HOST` (default `http://localhost:11434`)
/// - `OLLAMA_TIMEOUT_SECS` (default 300)
pub struct OllamaClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    transport: Option<Arc<dyn Transport>>,
}

impl OllamaClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            headers: Vec::new(),
            transport: None,
        }
    }

    /// Server address, e.g. `http://localhost:11434` or `gpu-box:11434`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Extra header sent with every request; replaces a default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Use a custom transport instead of the reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<OllamaClient> {
        let raw_base = self
            .base_url
            .or_else(|| std::env::var("OLLAMA_HOST").ok().filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = ClientConfig::new(parse_base_url(&raw_base)?);

        if let Some(timeout) = self.timeout.or_else(timeout_from_env) {
            config.timeout = timeout;
        }

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid header name: {}", e),
                    ErrorContext::new().with_field_path("headers").with_details(name.clone()),
                )
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid header value: {}", e),
                    ErrorContext::new().with_field_path(format!("headers.{}", name)),
                )
            })?;
            config.headers.insert(header_name, header_value);
        }

        let config = Arc::new(config);
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(config.clone())?),
        };
        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            "client configured"
        );

        Ok(OllamaClient::from_parts(config, transport))
    }
}

impl Default for OllamaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn timeout_from_env() -> Option<Duration> {
    std::env::var("OLLAMA_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.max(1)))
}
