//! Multi-speaker transcript generation gated by a strict line grammar.
//!
//! A batch is a fixed number of independent slots. Each slot draws its own
//! speakers and topic, then retries generation until the output passes
//! [`validate_transcript`] or its retry budget runs out.

pub mod batch;
pub mod grammar;
pub mod prompts;
pub mod sink;
pub mod speakers;
pub mod topics;

pub use batch::{BatchConfig, BatchError, BatchGenerator, BatchReport, SlotObserver, SlotPlan};
pub use grammar::{validate_transcript, Transcript, TranscriptError, TranscriptLine};
pub use prompts::{build_system_prompt, build_user_prompt, DEFAULT_FORMAT_RULES};
pub use sink::{DirectorySink, TranscriptSink};
pub use speakers::{SpeakerError, SpeakerPool, SpeakerSet};
pub use topics::{pick_topic, TOPICS};
