//! Error types for extraction operations with attempt history tracking.

use std::time::Duration;
use thiserror::Error;

use super::metrics::ExtractionMetrics;

/// Why a single attempt did not yield a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The agent answered but no JSON object could be extracted.
    NotJson,
    /// The agent loop itself failed before producing an answer.
    Generator(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotJson => f.write_str("answer did not contain a JSON object"),
            Self::Generator(e) => write!(f, "agent failed: {e}"),
        }
    }
}

/// Record of a single extraction attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// The attempt number (1-indexed).
    pub attempt_number: usize,
    /// Raw agent output text. Empty when the agent failed.
    pub raw_agent_output: String,
    /// Why the attempt was rejected.
    pub rejection: Rejection,
    /// Elapsed time at this attempt.
    pub elapsed: Duration,
}

/// Errors that can occur during extraction operations.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Every attempt was consumed without an acceptable answer.
    #[error("no JSON object after {attempts} attempts")]
    Exhausted {
        /// Number of attempts made.
        attempts: usize,
        /// History of all attempts with their rejection reasons.
        history: Vec<AttemptRecord>,
        /// Metrics tracked across all attempts.
        metrics: ExtractionMetrics,
    },
}
