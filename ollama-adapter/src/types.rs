use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Options applied to a single chat request.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on how long one request may take.
    pub timeout: Duration,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ChatOptions {
    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Role tag of a wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Conversation framing.
    System,
    /// Caller input.
    User,
    /// Model output.
    Assistant,
    /// Tool result.
    Tool,
}

/// A message as exchanged with the chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub role: Role,
    /// Text content. Empty for pure tool-call turns.
    #[serde(default)]
    pub content: String,
    /// Tool calls requested by the assistant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Name of the tool whose result this message carries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_name: None,
        }
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a tool-result message for `tool_name`.
    #[must_use]
    pub fn tool(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            ..Self::new(Role::Tool, content)
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The function to call.
    pub function: FunctionCall,
}

/// Name and arguments of a requested tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Tool name.
    pub name: String,
    /// Arguments as a JSON object.
    #[serde(default)]
    pub arguments: Value,
}

/// A tool advertised to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The function description.
    pub function: FunctionSpec,
}

/// Function portion of a [`ToolSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    /// Tool name.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// JSON Schema of the arguments.
    pub parameters: Value,
}

impl From<rig::completion::ToolDefinition> for ToolSpec {
    fn from(def: rig::completion::ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: FunctionSpec {
                name: def.name,
                description: def.description,
                parameters: def.parameters,
            },
        }
    }
}

/// Body of a `POST /api/chat` request.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// Model identifier.
    pub model: &'a str,
    /// Conversation so far.
    pub messages: &'a [Message],
    /// Always `false`: the adapter reads whole responses.
    pub stream: bool,
    /// Sampling options.
    pub options: RequestOptions,
    /// Advertised tools, omitted when empty.
    #[serde(skip_serializing_if = "<[ToolSpec]>::is_empty")]
    pub tools: &'a [ToolSpec],
}

/// Sampling options in the request body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RequestOptions {
    /// Sampling temperature.
    pub temperature: f32,
}

/// Body of a non-streaming chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The assistant's message.
    pub message: Message,
    /// Whether generation finished.
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_tools() {
        let messages = [Message::user("hi")];
        let request = ChatRequest {
            model: "m",
            messages: &messages,
            stream: false,
            options: RequestOptions { temperature: 0.0 },
            tools: &[],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "m",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false,
                "options": {"temperature": 0.0}
            })
        );
    }

    #[test]
    fn test_response_with_tool_calls_parses() {
        let body = json!({
            "model": "m",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [{"function": {"name": "read_file", "arguments": {"filename": "001.txt"}}}]
            },
            "done": true
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert!(response.done);
        assert_eq!(response.message.tool_calls.len(), 1);
        assert_eq!(response.message.tool_calls[0].function.name, "read_file");
        assert_eq!(
            response.message.tool_calls[0].function.arguments["filename"],
            "001.txt"
        );
    }

    #[test]
    fn test_tool_message_carries_name() {
        let value = serde_json::to_value(Message::tool("read_file", "contents")).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_name"], "read_file");
    }

    #[test]
    fn test_default_options() {
        let options = ChatOptions::default();
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
        assert!(options.temperature.abs() < f32::EPSILON);
    }
}
