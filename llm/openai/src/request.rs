//! OpenAI chat completions request body.

use compact_str::CompactString;
use llm::{Content, Message, Result, Role, Tool, ToolCall};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// OpenAI-compatible chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: CompactString,
    /// The messages to send.
    pub messages: Vec<WireMessage>,
    /// Temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /// Aggregator plugins (e.g. OpenRouter web search).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<Value>>,
}

impl Request {
    /// Encode canonical messages and tools.
    ///
    /// Fails with `invalid_tool_message` before anything is sent if a
    /// `tool` message lacks its call id or tool name.
    pub fn new(
        model: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Self> {
        let messages = messages
            .iter()
            .map(WireMessage::encode)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens,
            tools: tools.filter(|t| !t.is_empty()).map(|tools| {
                tools
                    .iter()
                    .map(|tool| {
                        json!({
                            "type": "function",
                            "function": {
                                "name": tool.name,
                                "description": tool.description,
                                "parameters": tool.input_schema,
                            },
                        })
                    })
                    .collect()
            }),
            plugins: None,
        })
    }

    /// Ask the upstream to ground the answer with web search.
    pub fn with_web_search(self) -> Self {
        Self {
            plugins: Some(vec![json!({ "id": "web" })]),
            ..self
        }
    }
}

/// A flat OpenAI message.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    /// The role of the author.
    pub role: Role,
    /// Text, content parts, or null for tool-call-only turns.
    pub content: Option<Content>,
    /// The call this tool result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<CompactString>,
    /// The tool that produced the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CompactString>,
    /// Tool calls requested by the assistant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

impl WireMessage {
    fn encode(msg: &Message) -> Result<Self> {
        msg.validate()?;
        Ok(Self {
            role: msg.role,
            content: msg.content.clone(),
            tool_call_id: msg.tool_call_id.clone(),
            name: msg.name.clone(),
            tool_calls: (msg.role == Role::Assistant && !msg.tool_calls.is_empty())
                .then(|| msg.tool_calls.iter().map(WireToolCall::from).collect()),
        })
    }
}

/// A tool call as OpenAI nests it: under a `function` object with
/// JSON-string arguments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WireToolCall {
    /// The ID of the tool call
    #[serde(default)]
    pub id: CompactString,
    /// The type of tool (currently only "function")
    #[serde(default = "function_type", rename = "type")]
    pub call_type: CompactString,
    /// The function to call
    pub function: WireFunction,
}

/// A function call within a tool call
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WireFunction {
    /// The name of the function to call
    #[serde(default)]
    pub name: CompactString,
    /// The arguments to pass to the function (JSON string)
    #[serde(default)]
    pub arguments: String,
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            call_type: function_type(),
            function: WireFunction {
                name: call.name.clone(),
                arguments: call.arguments(),
            },
        }
    }
}

fn function_type() -> CompactString {
    CompactString::const_new("function")
}
