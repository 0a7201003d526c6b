//! Rust adapter for the Ollama chat API.
//!
//! This crate provides endpoint resolution, a non-streaming chat client, and
//! a small tool-calling loop that dispatches model tool calls through a Rig
//! [`ToolSet`](rig::tool::ToolSet).

/// Tool-calling loop driving a model until it produces a final answer.
pub mod agent;
/// Resolution of the service address and model from the environment.
pub mod discovery;
/// Error types returned by adapter operations.
pub mod error;
/// HTTP transport for the chat endpoint.
pub mod http;
/// Wire types for requests, responses, and options.
pub mod types;

pub use agent::ToolLoop;
pub use discovery::{normalize_base_url, resolve_base_url, resolve_model, BASE_URL_ENV_VAR, MODEL_ENV_VAR};
pub use error::OllamaError;
pub use types::*;

/// High-level client for one model on one Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Normalized server address, without trailing slash.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    http: reqwest::Client,
}

impl OllamaClient {
    /// Creates a client for `model` served at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `OllamaError::InvalidBaseUrl` if the address is not an
    /// `http(s)` URL, or `OllamaError::Request` if the HTTP client cannot be built.
    pub fn new(base_url: &str, model: impl Into<String>) -> Result<Self, OllamaError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            model: model.into(),
            http,
        })
    }

    /// Sends one chat turn and returns the assistant's text.
    ///
    /// # Errors
    ///
    /// Returns `OllamaError` if the request fails, times out, or the response
    /// cannot be decoded.
    pub async fn chat(
        &self,
        messages: &[types::Message],
        options: &types::ChatOptions,
    ) -> Result<String, OllamaError> {
        let response = self.send(messages, &[], options).await?;
        Ok(response.message.content)
    }

    /// Sends one chat turn advertising `tools` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns `OllamaError` if the request fails, times out, or the response
    /// cannot be decoded.
    pub async fn send(
        &self,
        messages: &[types::Message],
        tools: &[types::ToolSpec],
        options: &types::ChatOptions,
    ) -> Result<types::ChatResponse, OllamaError> {
        let request = types::ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: types::RequestOptions {
                temperature: options.temperature,
            },
            tools,
        };
        http::post_chat(&self.http, &self.base_url, &request, options.timeout).await
    }
}
