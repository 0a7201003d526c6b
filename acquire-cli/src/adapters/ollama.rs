//! Bridges from the Ollama adapter to the [`Generator`] and [`AgentRunner`] traits.

use async_trait::async_trait;

use acquire::extraction::AGENT_PREAMBLE;
use acquire::tools::{input_toolset, InputDir};
use acquire::{AgentRunner, ChatMessage, Generator, GeneratorError, Role, SamplingOptions};
use ollama_adapter::{ChatOptions, Message, OllamaClient, OllamaError, ToolLoop};

use crate::config::ServiceConfig;
use crate::errors::CliError;

/// Plain chat completions, used for transcript generation.
pub struct OllamaGenerator {
    client: OllamaClient,
    options: ChatOptions,
}

impl OllamaGenerator {
    /// Creates a generator for the configured service.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, CliError> {
        Ok(Self {
            client: config.client()?,
            options: ChatOptions::default().with_timeout(config.timeout),
        })
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &SamplingOptions,
    ) -> Result<String, GeneratorError> {
        let wire = to_wire(messages);
        let options = self.options.with_temperature(options.temperature);
        self.client
            .chat(&wire, &options)
            .await
            .map_err(into_generator_error)
    }
}

/// Tool-using agent over the input directory, used by the count agent.
pub struct OllamaAgent {
    tool_loop: ToolLoop,
}

impl OllamaAgent {
    /// Creates an agent that can list and read the files in `inputs`.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the client cannot be built.
    pub fn new(config: &ServiceConfig, inputs: InputDir) -> Result<Self, CliError> {
        let options = ChatOptions::default()
            .with_temperature(SamplingOptions::DETERMINISTIC.temperature)
            .with_timeout(config.timeout);
        let tool_loop = ToolLoop::new(config.client()?, input_toolset(inputs))
            .preamble(AGENT_PREAMBLE)
            .options(options);
        Ok(Self { tool_loop })
    }
}

#[async_trait]
impl AgentRunner for OllamaAgent {
    async fn run(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        self.tool_loop
            .run(&to_wire(messages))
            .await
            .map_err(into_generator_error)
    }
}

fn to_wire(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .map(|m| match m.role {
            Role::System => Message::system(m.content.as_str()),
            Role::User => Message::user(m.content.as_str()),
            Role::Assistant => Message::assistant(m.content.as_str()),
            Role::Tool => Message::tool("", m.content.as_str()),
        })
        .collect()
}

/// Maps adapter failures onto the transient error kinds the loops retry on.
fn into_generator_error(e: OllamaError) -> GeneratorError {
    match e {
        OllamaError::Status { code, body } => GeneratorError::Status { code, body },
        OllamaError::Decode(msg) => GeneratorError::Decode(msg),
        OllamaError::Tool(msg) => GeneratorError::Tool(msg),
        OllamaError::TurnLimit(turns) => GeneratorError::TurnLimit(turns),
        other @ (OllamaError::Request(_)
        | OllamaError::MissingConfig(_)
        | OllamaError::InvalidBaseUrl(_)) => GeneratorError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ollama_adapter::Role as WireRole;

    #[test]
    fn test_roles_map_one_to_one() {
        let wire = to_wire(&[
            ChatMessage::system("s"),
            ChatMessage::user("u"),
            ChatMessage::assistant("a"),
        ]);
        let roles: Vec<_> = wire.iter().map(|m| m.role).collect();
        assert_eq!(roles, [WireRole::System, WireRole::User, WireRole::Assistant]);
        assert_eq!(wire[1].content, "u");
    }

    #[test]
    fn test_error_mapping_keeps_status() {
        let mapped = into_generator_error(OllamaError::Status {
            code: 503,
            body: "busy".to_string(),
        });
        assert!(matches!(mapped, GeneratorError::Status { code: 503, .. }));
        assert!(matches!(
            into_generator_error(OllamaError::TurnLimit(25)),
            GeneratorError::TurnLimit(25)
        ));
    }
}
