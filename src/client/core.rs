use crate::client::builder::OllamaClientBuilder;
use crate::config::ClientConfig;
use crate::requests::Endpoint;
use crate::resources::{ApiResource, GenerationResource, ManagementResource};
use crate::transport::{Response, Transport};
use crate::Result;
use std::sync::Arc;

/// Client for one Ollama server.
///
/// Cloning is cheap; clones share configuration and connection pool.
#[derive(Clone)]
pub struct OllamaClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl OllamaClient {
    /// Client with default settings for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        OllamaClientBuilder::new().base_url(base_url).build()
    }

    pub fn builder() -> OllamaClientBuilder {
        OllamaClientBuilder::new()
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::from_parts(Arc::new(config), transport)
    }

    pub(crate) fn from_parts(config: Arc<ClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Root facade: version plus the other facades.
    pub fn api(&self) -> ApiResource {
        ApiResource::new(self.transport.clone())
    }

    pub fn generation(&self) -> GenerationResource {
        GenerationResource::new(self.transport.clone())
    }

    pub fn management(&self) -> ManagementResource {
        ManagementResource::new(self.transport.clone())
    }

    /// Send any request builder or prebuilt descriptor.
    pub async fn send(&self, endpoint: &impl Endpoint) -> Result<Response> {
        self.transport.send(endpoint.to_request()?).await
    }
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}
