/// Ollama-backed generator and agent.
pub mod ollama;
