//! Boundary types for the text generator and the tool-using agent loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the whole conversation.
    System,
    /// Input from the caller.
    User,
    /// Output produced by the model.
    Assistant,
    /// Result of a tool invocation fed back to the model.
    Tool,
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the message.
    pub role: Role,
    /// Text content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters fixed at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    /// Sampling temperature. `0.0` asks for deterministic output.
    pub temperature: f32,
}

impl SamplingOptions {
    /// Deterministic sampling, used when extracting answers.
    pub const DETERMINISTIC: Self = Self { temperature: 0.0 };

    /// Exploratory sampling, used when generating varied transcripts.
    pub const EXPLORATORY: Self = Self { temperature: 0.8 };
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::DETERMINISTIC
    }
}

/// Failures raised by the generator itself, as opposed to validation rejections.
///
/// Every variant is treated as transient by the retry controllers.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The request never produced a response (connection, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The agent loop could not run a tool round-trip.
    #[error("tool round-trip failed: {0}")]
    Tool(String),

    /// The agent kept calling tools without producing a final answer.
    #[error("agent did not produce a final answer within {0} turns")]
    TurnLimit(usize),
}

/// A text-completion service: one conversation in, one completion out.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produces a single completion for the given messages.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &SamplingOptions,
    ) -> Result<String, GeneratorError>;
}

/// An opaque tool-using agent loop.
///
/// Implementations own their tool capability set; callers only see the
/// conversation going in and the agent's final textual answer coming out.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Runs the agent to completion and returns its final answer.
    async fn run(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_sampling_presets() {
        assert!(SamplingOptions::DETERMINISTIC.temperature.abs() < f32::EPSILON);
        assert!((SamplingOptions::EXPLORATORY.temperature - 0.8).abs() < f32::EPSILON);
        assert_eq!(SamplingOptions::default(), SamplingOptions::DETERMINISTIC);
    }
}
