use std::time::Duration;

use crate::error::OllamaError;
use crate::types::{ChatRequest, ChatResponse};

const MAX_ERROR_BODY: usize = 500;

/// Posts a chat request and decodes the whole response.
///
/// # Errors
///
/// Returns `OllamaError::Request` on transport failure or timeout,
/// `OllamaError::Status` on a non-success status, and
/// `OllamaError::Decode` if the body is not a chat response.
pub async fn post_chat(
    http: &reqwest::Client,
    base_url: &str,
    request: &ChatRequest<'_>,
    timeout: Duration,
) -> Result<ChatResponse, OllamaError> {
    let url = format!("{base_url}/api/chat");
    tracing::debug!(url = %url, model = request.model, messages = request.messages.len(), "Sending chat request");

    let response = http.post(&url).json(request).timeout(timeout).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(OllamaError::Status {
            code: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY),
        });
    }

    serde_json::from_str(&body).map_err(|e| OllamaError::Decode(e.to_string()))
}

fn truncate(body: &str, max: usize) -> String {
    if body.chars().count() <= max {
        return body.to_string();
    }
    let cut: String = body.chars().take(max).collect();
    format!("{cut}...")
}
