//! Retry loop that extracts a JSON object from an agent's final answer.
//!
//! - [`ExtractionOrchestrator`] - Bounded retry loop with a corrective follow-up
//! - [`extract_json_object`] - Lenient JSON object extraction from free text
//! - [`ExtractionError`] - Exhaustion report with attempt history
//! - [`ExtractionMetrics`] - Token and timing metrics
//! - [`ExtractionConfig`] - Retry behavior configuration

pub mod config;
pub mod error;
pub mod feedback;
pub mod json;
pub mod metrics;
pub mod orchestrator;
pub mod task;

pub use config::ExtractionConfig;
pub use error::{AttemptRecord, ExtractionError, Rejection};
pub use feedback::{build_attempt_context, CORRECTIVE_INSTRUCTION};
pub use json::extract_json_object;
pub use metrics::{estimate_tokens, ExtractionMetrics};
pub use orchestrator::{Extraction, ExtractionOrchestrator};
pub use task::{load_task_prompt, TaskPromptError, AGENT_PREAMBLE};
