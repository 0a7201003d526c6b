//! Sequential batch generation with per-slot retries.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use super::grammar::validate_transcript;
use super::prompts::build_user_prompt;
use super::sink::{DirectorySink, TranscriptSink};
use super::speakers::{SpeakerPool, SpeakerSet};
use super::topics::pick_topic;
use crate::generator::{ChatMessage, Generator, SamplingOptions};

/// Configuration for a transcript batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of slots to generate.
    pub count: usize,
    /// Generation attempts per slot (default: 3).
    pub max_retries: usize,
    /// Approximate number of messages requested per transcript (default: 100).
    pub message_count: usize,
    /// Base delay for the exponential backoff after generator failures (default: 1s).
    pub backoff_unit: Duration,
    /// Sampling parameters for every call (default: exploratory).
    pub sampling: SamplingOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 1,
            max_retries: 3,
            message_count: 100,
            backoff_unit: Duration::from_secs(1),
            sampling: SamplingOptions::EXPLORATORY,
        }
    }
}

impl BatchConfig {
    /// Set the number of slots.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the attempts per slot.
    #[must_use]
    pub const fn with_max_retries(mut self, max: usize) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the approximate message count per transcript.
    #[must_use]
    pub const fn with_message_count(mut self, messages: usize) -> Self {
        self.message_count = messages;
        self
    }

    /// Set the backoff base delay.
    #[must_use]
    pub const fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }
}

/// What a single slot will generate. Fixed for all of the slot's retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    /// 1-based slot index.
    pub index: usize,
    /// Speakers drawn for this slot, in draw order.
    pub speakers: Vec<String>,
    /// Conversation topic.
    pub topic: &'static str,
}

impl SlotPlan {
    /// The allowed speaker set used to validate this slot.
    #[must_use]
    pub fn allowed(&self) -> SpeakerSet {
        self.speakers.iter().cloned().collect()
    }

    /// The file name the slot is persisted under.
    #[must_use]
    pub fn file_name(&self) -> String {
        DirectorySink::file_name(self.index)
    }
}

/// Receives progress notifications while a batch runs.
pub trait SlotObserver {
    /// Called before the first attempt of a slot.
    fn slot_started(&mut self, _plan: &SlotPlan, _total: usize) {}

    /// Called once a slot is accepted or has exhausted its retries.
    fn slot_finished(&mut self, _plan: &SlotPlan, _accepted: bool) {}
}

impl SlotObserver for () {}

/// Outcome counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Slots whose transcript was accepted and persisted.
    pub succeeded: usize,
    /// Slots that exhausted their retries.
    pub failed: usize,
    /// Slots requested.
    pub total: usize,
}

impl BatchReport {
    /// `true` when no slot failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Done: {} succeeded, {} failed out of {} total",
            self.succeeded, self.failed, self.total
        )
    }
}

/// Errors that abort a whole batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// An accepted transcript could not be persisted.
    #[error("failed to persist slot {slot}: {source}")]
    Sink {
        /// 1-based slot index.
        slot: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Drives transcript generation slot by slot.
pub struct BatchGenerator {
    pool: SpeakerPool,
    system_prompt: String,
    config: BatchConfig,
}

impl BatchGenerator {
    /// Creates a generator drawing speakers from `pool`.
    #[must_use]
    pub const fn new(pool: SpeakerPool, system_prompt: String, config: BatchConfig) -> Self {
        Self {
            pool,
            system_prompt,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Draws the speakers and topic for a slot.
    pub fn plan_slot<R: Rng>(&self, index: usize, rng: &mut R) -> SlotPlan {
        let speakers = self.pool.sample(rng);
        let topic = pick_topic(rng);
        SlotPlan {
            index,
            speakers,
            topic,
        }
    }

    /// Runs the retry loop for one slot.
    ///
    /// Returns the trimmed, validated transcript, or `None` once every attempt
    /// has failed. Grammar rejections retry immediately; generator failures
    /// wait `backoff_unit * 2^attempt` first.
    pub async fn generate_slot<G>(&self, generator: &G, plan: &SlotPlan) -> Option<String>
    where
        G: Generator + ?Sized,
    {
        let allowed = plan.allowed();
        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(build_user_prompt(
                &plan.speakers,
                self.config.message_count,
                plan.topic,
            )),
        ];
        let max_retries = self.config.max_retries;

        tracing::debug!(slot = plan.index, speakers = ?plan.speakers, topic = plan.topic, "Planned slot");

        for attempt in 1..=max_retries {
            match generator.complete(&messages, &self.config.sampling).await {
                Ok(text) => {
                    let text = text.trim();
                    match validate_transcript(text, &allowed) {
                        Ok(_) => return Some(text.to_string()),
                        Err(e) => {
                            tracing::warn!(slot = plan.index, attempt, error = %e, "Attempt {attempt}: validation failed: {e}");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(slot = plan.index, attempt, error = %e, "Attempt {attempt}: LLM error: {e}");
                    if attempt < max_retries {
                        tokio::time::sleep(backoff_delay(self.config.backoff_unit, attempt)).await;
                    }
                }
            }
        }

        None
    }

    /// Generates every slot in order, persisting accepted transcripts.
    ///
    /// A failed slot never stops the batch; only a sink error does.
    pub async fn run<G, R, S, O>(
        &self,
        generator: &G,
        rng: &mut R,
        sink: &mut S,
        observer: &mut O,
    ) -> Result<BatchReport, BatchError>
    where
        G: Generator + ?Sized,
        R: Rng,
        S: TranscriptSink + ?Sized,
        O: SlotObserver + ?Sized,
    {
        let total = self.config.count;
        let mut report = BatchReport {
            total,
            ..BatchReport::default()
        };

        for index in 1..=total {
            let plan = self.plan_slot(index, rng);
            observer.slot_started(&plan, total);

            if let Some(transcript) = self.generate_slot(generator, &plan).await {
                sink.persist(index, &transcript)
                    .map_err(|source| BatchError::Sink { slot: index, source })?;
                report.succeeded += 1;
                observer.slot_finished(&plan, true);
            } else {
                tracing::warn!(slot = index, "Skipping {}: all retries failed", plan.file_name());
                report.failed += 1;
                observer.slot_finished(&plan, false);
            }
        }

        Ok(report)
    }
}

/// Delay before retrying after a generator failure on the 1-based `attempt`.
#[must_use]
pub fn backoff_delay(unit: Duration, attempt: usize) -> Duration {
    let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
    unit.saturating_mul(2u32.saturating_pow(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_from_two_units() {
        let unit = Duration::from_secs(1);
        assert_eq!(backoff_delay(unit, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(unit, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(unit, 3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates() {
        let unit = Duration::from_millis(10);
        assert_eq!(backoff_delay(unit, 64), unit.saturating_mul(u32::MAX));
    }

    #[test]
    fn test_report_summary() {
        let report = BatchReport {
            succeeded: 4,
            failed: 1,
            total: 5,
        };
        assert!(!report.is_success());
        assert_eq!(report.to_string(), "Done: 4 succeeded, 1 failed out of 5 total");
    }

    #[test]
    fn test_slot_plan_file_name_and_allowed() {
        let plan = SlotPlan {
            index: 7,
            speakers: vec!["sam".to_string(), "alex".to_string()],
            topic: "planning a camping trip",
        };
        assert_eq!(plan.file_name(), "007.txt");
        assert!(plan.allowed().contains("alex"));
        assert!(!plan.allowed().contains("kim"));
    }
}
