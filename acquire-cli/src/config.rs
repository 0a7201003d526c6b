use std::time::Duration;

use ollama_adapter::{discovery, OllamaClient, OllamaError};

use crate::errors::CliError;

/// Model used by the transcript generator when none is given.
pub const DEFAULT_GENERATOR_MODEL: &str = "gpt-oss:20b";

/// Where and how to reach the model service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Normalized server address.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Resolves the configuration from explicit values and the environment.
    ///
    /// A `.env` file in the working directory is loaded first; variables
    /// already set in the process environment win over it.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` when the address or model is missing or the
    /// address is malformed.
    pub fn resolve(base_url: Option<String>, model: Option<String>) -> Result<Self, CliError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }

        let base_url = discovery::resolve_base_url(base_url).map_err(config_error)?;
        let model = discovery::resolve_model(model).map_err(config_error)?;
        Ok(Self {
            base_url,
            model,
            timeout: ollama_adapter::DEFAULT_TIMEOUT,
        })
    }

    /// Builds a client for this service.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the client cannot be constructed.
    pub fn client(&self) -> Result<OllamaClient, CliError> {
        OllamaClient::new(&self.base_url, self.model.clone()).map_err(config_error)
    }
}

fn config_error(e: OllamaError) -> CliError {
    CliError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_resolve() {
        let config = ServiceConfig::resolve(
            Some("http://localhost:11434/v1".to_string()),
            Some("qwen3:8b".to_string()),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "qwen3:8b");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(config.client().is_ok());
    }

    #[test]
    fn test_malformed_address_is_config_error() {
        let err = ServiceConfig::resolve(Some("localhost".to_string()), Some("m".to_string()))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
