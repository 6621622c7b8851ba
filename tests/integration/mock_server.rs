//! Mock HTTP server setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use ollama_lib_rust::OllamaClient;

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server.
    pub fn client(&self) -> OllamaClient {
        OllamaClient::builder()
            .base_url(&self.base_url)
            .build()
            .expect("mock client")
    }

    /// Buffered JSON response.
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Buffered JSON response, only when the request body is exactly `expected_body`.
    pub async fn mock_json_exact(
        &mut self,
        method: &str,
        path: &str,
        expected_body: &str,
        body: &str,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_body(Matcher::Exact(expected_body.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Newline-delimited JSON stream, one line per element.
    pub async fn mock_ndjson(&mut self, path: &str, lines: &[&str]) -> Mock {
        let body: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        self.mock_raw_ndjson(path, &body).await
    }

    /// Stream body used as given, for truncated or malformed streams.
    pub async fn mock_raw_ndjson(&mut self, path: &str, body: &str) -> Mock {
        self.server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "application/x-ndjson")
            .with_body(body)
            .create_async()
            .await
    }
}
