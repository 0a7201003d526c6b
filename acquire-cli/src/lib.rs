#![deny(missing_docs)]
//! Shared plumbing for the `count-agent` and `generate-transcripts` binaries.
//!
//! Bridges the Ollama adapter into the acquisition loops and holds the
//! configuration, logging, and error types both binaries use.

/// Bridges from backend clients to the acquisition traits.
pub mod adapters;
/// Service configuration resolved from flags and the environment.
pub mod config;
/// Error types for the binaries.
pub mod errors;
/// Tracing subscriber setup.
pub mod logging;

pub use adapters::ollama::{OllamaAgent, OllamaGenerator};
pub use config::ServiceConfig;
pub use errors::CliError;
