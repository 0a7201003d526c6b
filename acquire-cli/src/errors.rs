use thiserror::Error;

/// Errors that stop a binary before or after its acquisition loop.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the Ollama adapter outside any retry loop.
    #[error("Ollama adapter error: {0}")]
    Ollama(#[from] ollama_adapter::OllamaError),

    /// The speaker pool could not be loaded.
    #[error("Character error: {0}")]
    Speakers(#[from] acquire::transcript::SpeakerError),

    /// The task prompt could not be assembled.
    #[error("Task prompt error: {0}")]
    TaskPrompt(#[from] acquire::extraction::TaskPromptError),

    /// Every extraction attempt was rejected.
    #[error(transparent)]
    Extraction(#[from] acquire::extraction::ExtractionError),

    /// The batch was aborted.
    #[error("Batch error: {0}")]
    Batch(#[from] acquire::transcript::BatchError),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
