use super::{Response, Transport, TransportError};
use crate::config::ClientConfig;
use crate::requests::ApiRequest;
use crate::Result;
use futures::TryStreamExt;
use std::sync::Arc;
use std::time::Duration;

/// reqwest-backed transport bound to one server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(config.headers.clone())
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Response> {
        let url = request.url(&self.config.base_url)?;
        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            streaming = request.is_streaming(),
            "dispatching request"
        );

        let mut req = self.client.request(request.method().clone(), url);
        if let Some(body) = request.body() {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                path = %request.path(),
                "server returned non-success status"
            );
        }
        let headers = resp.headers().clone();

        // Convert reqwest bytes stream to our unified BoxStream
        let body = resp
            .bytes_stream()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)));

        Ok(Response::new(
            status,
            headers,
            Box::pin(body),
            request.is_streaming(),
        ))
    }
}
