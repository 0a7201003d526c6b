//! Resolution of the Ollama service address and model identifier.

use crate::error::OllamaError;

/// Environment variable holding the Ollama server address.
pub const BASE_URL_ENV_VAR: &str = "OLLAMA_BASE_URL";

/// Environment variable holding the model identifier.
pub const MODEL_ENV_VAR: &str = "OLLAMA_MODEL";

/// Locates the server address.
///
/// Resolution order:
/// 1. `explicit` if provided.
/// 2. The `OLLAMA_BASE_URL` environment variable.
///
/// # Errors
///
/// Returns `OllamaError::MissingConfig` when neither is set (or set to an
/// empty string), and `OllamaError::InvalidBaseUrl` when the value is not an
/// `http(s)` URL.
pub fn resolve_base_url(explicit: Option<String>) -> Result<String, OllamaError> {
    let raw = non_empty(explicit)
        .or_else(|| non_empty(std::env::var(BASE_URL_ENV_VAR).ok()))
        .ok_or(OllamaError::MissingConfig(BASE_URL_ENV_VAR))?;
    normalize_base_url(&raw)
}

/// Locates the model identifier: `explicit` first, then `OLLAMA_MODEL`.
///
/// # Errors
///
/// Returns `OllamaError::MissingConfig` when neither is set.
pub fn resolve_model(explicit: Option<String>) -> Result<String, OllamaError> {
    non_empty(explicit)
        .or_else(|| non_empty(std::env::var(MODEL_ENV_VAR).ok()))
        .ok_or(OllamaError::MissingConfig(MODEL_ENV_VAR))
}

/// Normalizes a server address to the form the native API expects.
///
/// Trailing slashes and a trailing `/v1` (the OpenAI-compatible prefix) are
/// stripped so either style of address can be configured.
///
/// # Errors
///
/// Returns `OllamaError::InvalidBaseUrl` unless the address starts with
/// `http://` or `https://`.
pub fn normalize_base_url(raw: &str) -> Result<String, OllamaError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/v1").unwrap_or(trimmed).trim_end_matches('/');

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(OllamaError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
