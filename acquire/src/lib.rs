//! Bounded retry acquisition of validated text from a language model.
//!
//! The crate pairs a retry controller with a validator. Two pairings ship:
//!
//! - [`extraction`]: drive an agent until its final answer contains a JSON object.
//! - [`transcript`]: generate multi-speaker transcripts that satisfy a strict line grammar.
//!
//! The model itself sits behind the [`Generator`] and [`AgentRunner`] traits so
//! any backend can be plugged in.

pub mod extraction;
pub mod generator;
pub mod tools;
pub mod transcript;

pub use generator::{AgentRunner, ChatMessage, Generator, GeneratorError, Role, SamplingOptions};

/// Common traits and types for ergonomic usage of the acquisition loops.
pub mod prelude {
    pub use crate::extraction::{
        extract_json_object, Extraction, ExtractionConfig, ExtractionError, ExtractionMetrics,
        ExtractionOrchestrator,
    };
    pub use crate::generator::{
        AgentRunner, ChatMessage, Generator, GeneratorError, Role, SamplingOptions,
    };
    pub use crate::tools::{input_toolset, InputDir, ListInputFiles, ReadInputFile};
    pub use crate::transcript::{
        validate_transcript, BatchConfig, BatchGenerator, BatchReport, DirectorySink, SpeakerPool,
        SpeakerSet, Transcript, TranscriptError, TranscriptSink,
    };
}
