//! A minimal tool-calling loop.
//!
//! The model is called with the advertised tools. Each requested call is
//! dispatched through the [`ToolSet`] and its result appended as a `tool`
//! message, until the model answers without calling anything.

use rig::tool::ToolSet;

use crate::error::OllamaError;
use crate::types::{ChatOptions, Message, ToolSpec};
use crate::OllamaClient;

/// Default bound on model turns per run.
pub const DEFAULT_MAX_TURNS: usize = 25;

const PREVIEW_CHARS: usize = 80;

/// Drives one model through tool calls until it gives a final answer.
pub struct ToolLoop {
    client: OllamaClient,
    toolset: ToolSet,
    preamble: Option<String>,
    options: ChatOptions,
    max_turns: usize,
}

impl ToolLoop {
    /// Creates a loop over `toolset` with default options.
    #[must_use]
    pub fn new(client: OllamaClient, toolset: ToolSet) -> Self {
        Self {
            client,
            toolset,
            preamble: None,
            options: ChatOptions::default(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Sets a system message prepended to every run.
    #[must_use]
    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    /// Sets the request options.
    #[must_use]
    pub const fn options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the turn bound.
    #[must_use]
    pub const fn max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Runs the conversation to a final answer.
    ///
    /// Tool failures are reported back to the model as text rather than
    /// aborting the run.
    ///
    /// # Errors
    ///
    /// Returns `OllamaError` if a request fails, the tool definitions cannot
    /// be collected, or no final answer arrives within the turn bound.
    pub async fn run(&self, messages: &[Message]) -> Result<String, OllamaError> {
        let tools: Vec<ToolSpec> = self
            .toolset
            .get_tool_definitions()
            .await
            .map_err(|e| OllamaError::Tool(e.to_string()))?
            .into_iter()
            .map(ToolSpec::from)
            .collect();

        let mut history = Vec::with_capacity(messages.len() + 1);
        if let Some(preamble) = &self.preamble {
            history.push(Message::system(preamble.clone()));
        }
        history.extend_from_slice(messages);

        for turn in 1..=self.max_turns {
            let response = self.client.send(&history, &tools, &self.options).await?;
            let reply = response.message;

            if reply.tool_calls.is_empty() {
                tracing::debug!(turn, "Agent produced final answer");
                return Ok(reply.content);
            }

            if !reply.content.trim().is_empty() {
                tracing::debug!("ai: {}", preview(&reply.content));
            }

            let calls = reply.tool_calls.clone();
            history.push(reply);

            for call in calls {
                let name = call.function.name;
                let args = match call.function.arguments {
                    serde_json::Value::Null => "{}".to_string(),
                    other => other.to_string(),
                };
                tracing::info!("  -> {name}({args})");

                let output = match self.toolset.call(&name, args).await {
                    Ok(raw) => unquote(raw),
                    Err(e) => {
                        tracing::warn!(tool = %name, error = %e, "Tool call failed");
                        format!("Error: {e}")
                    }
                };
                tracing::debug!("  <- {}", preview(&output));
                history.push(Message::tool(name, output));
            }
        }

        Err(OllamaError::TurnLimit(self.max_turns))
    }
}

/// Tool outputs come back JSON-encoded; plain strings are unwrapped.
fn unquote(raw: String) -> String {
    serde_json::from_str::<String>(&raw).unwrap_or(raw)
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a\\nb\"".to_string()), "a\nb");
        assert_eq!(unquote("{\"x\":1}".to_string()), "{\"x\":1}");
        assert_eq!(unquote("plain".to_string()), "plain");
    }

    #[test]
    fn test_preview_flattens_and_cuts() {
        assert_eq!(preview("a\nb"), "a b");
        let long = "x".repeat(100);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 3);
    }
}
