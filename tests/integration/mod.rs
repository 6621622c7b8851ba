//! Shared fixtures for tests against a mock Ollama server

pub mod mock_server;
