//! Orchestration layer for the bounded JSON extraction retry loop.

use serde_json::{Map, Value};
use tokio::time::Instant;

use super::config::ExtractionConfig;
use super::error::{AttemptRecord, ExtractionError, Rejection};
use super::feedback::build_attempt_context;
use super::json::extract_json_object;
use super::metrics::ExtractionMetrics;
use crate::generator::AgentRunner;

/// Successful extraction: the accepted object and how it was obtained.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The extracted JSON object.
    pub value: Map<String, Value>,
    /// Metrics tracked up to and including the accepted attempt.
    pub metrics: ExtractionMetrics,
}

/// Orchestrator for running bounded retry loops over an agent.
///
/// Each attempt sends the task (plus a corrective follow-up after the first
/// attempt) to the agent and runs [`extract_json_object`] on the final answer.
/// The first acceptable answer wins. Agent failures count as spent attempts and
/// never escape the loop.
pub struct ExtractionOrchestrator {
    config: ExtractionConfig,
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionOrchestrator {
    /// Creates a new orchestrator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Creates a new orchestrator with the given configuration.
    #[must_use]
    pub const fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Sets the maximum number of attempts (fluent builder pattern).
    #[must_use]
    pub const fn max_attempts(mut self, max: usize) -> Self {
        self.config.max_attempts = max;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Runs the extraction retry loop against the given agent.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Exhausted` once every attempt has been spent
    /// without an acceptable answer. This is the only failure mode.
    pub async fn extract<R>(&self, runner: &R, task_prompt: &str) -> Result<Extraction, ExtractionError>
    where
        R: AgentRunner + ?Sized,
    {
        let start = Instant::now();
        let max_attempts = self.config.max_attempts;
        let mut history: Vec<AttemptRecord> = Vec::new();
        let mut metrics = ExtractionMetrics::default();

        for attempt in 1..=max_attempts {
            tracing::info!(attempt, max_attempts, "--- Attempt {attempt}/{max_attempts} ---");

            let messages =
                build_attempt_context(task_prompt, &self.config.corrective_instruction, attempt);
            metrics.record_context(&messages);

            let answer = match runner.run(&messages).await {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "agent run failed");
                    metrics.record_failure();
                    history.push(AttemptRecord {
                        attempt_number: attempt,
                        raw_agent_output: String::new(),
                        rejection: Rejection::Generator(e.to_string()),
                        elapsed: start.elapsed(),
                    });
                    continue;
                }
            };
            metrics.record_answer(&answer);

            if let Some(value) = extract_json_object(&answer) {
                tracing::debug!(attempt, "extracted JSON object");
                return Ok(Extraction {
                    value,
                    metrics: metrics.finish(start.elapsed()),
                });
            }

            tracing::warn!(attempt, "Could not parse JSON from output, retrying...");
            history.push(AttemptRecord {
                attempt_number: attempt,
                raw_agent_output: answer,
                rejection: Rejection::NotJson,
                elapsed: start.elapsed(),
            });
        }

        tracing::error!(max_attempts, "Failed to get valid JSON after {max_attempts} attempts.");

        Err(ExtractionError::Exhausted {
            attempts: max_attempts,
            history,
            metrics: metrics.finish(start.elapsed()),
        })
    }
}
