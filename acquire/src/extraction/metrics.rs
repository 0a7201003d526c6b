//! Per-run accounting for the extraction loop.

use std::time::Duration;

use crate::generator::ChatMessage;

/// What one extraction run cost, whether or not it succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionMetrics {
    /// Agent runs started.
    pub total_attempts: usize,
    /// Runs where the agent itself failed and produced no answer.
    pub failed_runs: usize,
    /// Time from the first attempt to the final verdict.
    pub wall_time: Duration,
    /// Rough size of every context handed to the agent.
    pub estimated_input_tokens: usize,
    /// Rough size of every answer the agent returned.
    pub estimated_output_tokens: usize,
}

impl ExtractionMetrics {
    /// Counts an attempt and the context sent with it.
    pub fn record_context(&mut self, messages: &[ChatMessage]) {
        self.total_attempts += 1;
        self.estimated_input_tokens += messages.iter().map(|m| estimate_tokens(&m.content)).sum::<usize>();
    }

    /// Counts an answer returned by the agent.
    pub fn record_answer(&mut self, answer: &str) {
        self.estimated_output_tokens += estimate_tokens(answer);
    }

    /// Counts a run that ended in an agent error.
    pub fn record_failure(&mut self) {
        self.failed_runs += 1;
    }

    /// Stamps the final wall time.
    #[must_use]
    pub const fn finish(mut self, wall_time: Duration) -> Self {
        self.wall_time = wall_time;
        self
    }
}

/// Rough token count: one token per four characters, rounded up.
///
/// ```
/// use acquire::extraction::estimate_tokens;
///
/// assert_eq!(estimate_tokens("hello"), 2);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_counts_chars() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("alex: 你好"), 2);
    }

    #[test]
    fn test_recording_accumulates() {
        let mut metrics = ExtractionMetrics::default();
        metrics.record_context(&[ChatMessage::user("abcdefgh")]);
        metrics.record_failure();
        metrics.record_context(&[ChatMessage::user("abcd"), ChatMessage::user("ab")]);
        metrics.record_answer("{\"a\": 1}");
        let metrics = metrics.finish(Duration::from_millis(5));

        assert_eq!(metrics.total_attempts, 2);
        assert_eq!(metrics.failed_runs, 1);
        assert_eq!(metrics.estimated_input_tokens, 4);
        assert_eq!(metrics.estimated_output_tokens, 2);
        assert_eq!(metrics.wall_time, Duration::from_millis(5));
    }
}
