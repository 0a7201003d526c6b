//! Configuration for extraction retry behavior.

use super::feedback::CORRECTIVE_INSTRUCTION;

/// Configuration for extraction retry behavior.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Maximum number of attempts before giving up (default: 3).
    pub max_attempts: usize,
    /// Follow-up message appended to the task on every attempt after the first.
    pub corrective_instruction: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            corrective_instruction: CORRECTIVE_INSTRUCTION.to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Set the maximum number of attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    /// Replace the corrective follow-up message.
    #[must_use]
    pub fn with_corrective_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.corrective_instruction = instruction.into();
        self
    }
}
