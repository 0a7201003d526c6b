use thiserror::Error;

/// Errors returned by the Ollama adapter.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// A required setting was not provided.
    #[error("{0} must be set (in .env or environment)")]
    MissingConfig(&'static str),

    /// The server address is not usable.
    #[error("invalid Ollama base URL: {0:?}")]
    InvalidBaseUrl(String),

    /// The request could not be sent or the response not received.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Ollama returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The tool set could not describe its tools.
    #[error("tool set error: {0}")]
    Tool(String),

    /// The model kept calling tools past the turn budget.
    #[error("no final answer within {0} turns")]
    TurnLimit(usize),
}
