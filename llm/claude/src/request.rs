//! Request body for the Anthropic Messages API.

use compact_str::CompactString;
use llm::{Content, Message, Result, Role, Tool};
use serde::Serialize;
use serde_json::{Value, json};

/// The request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: CompactString,
    /// The messages array (Anthropic content block format).
    pub messages: Vec<Value>,
    /// Temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// System prompt (top-level, not in messages array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Tools the model may call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
}

impl Request {
    /// Build the request, converting canonical messages to the Anthropic
    /// content block format.
    ///
    /// Every system message is lifted into `system`, joined by a blank
    /// line. The other turns keep their order.
    pub fn new(
        model: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Self> {
        let mut system = Vec::new();
        let mut turns = Vec::with_capacity(messages.len());

        for msg in messages {
            msg.validate()?;
            match msg.role {
                Role::System => system.push(msg.text()),
                Role::User => turns.push(json!({
                    "role": "user",
                    "content": content_value(msg.content.as_ref()),
                })),
                Role::Assistant if msg.tool_calls.is_empty() => turns.push(json!({
                    "role": "assistant",
                    "content": content_value(msg.content.as_ref()),
                })),
                Role::Assistant => {
                    let mut blocks = Vec::with_capacity(msg.tool_calls.len() + 1);
                    let text = msg.text();
                    if !text.is_empty() {
                        blocks.push(json!({ "type": "text", "text": text }));
                    }
                    for call in &msg.tool_calls {
                        blocks.push(json!({
                            "type": "tool_use",
                            "id": call.id,
                            "name": call.name,
                            "input": call.parameters,
                        }));
                    }
                    turns.push(json!({ "role": "assistant", "content": blocks }));
                }
                Role::Tool => turns.push(json!({
                    "role": "user",
                    "content": [{
                        "type": "tool_result",
                        "tool_use_id": msg.tool_call_id,
                        "content": content_value(msg.content.as_ref()),
                    }],
                })),
            }
        }

        Ok(Self {
            model: model.into(),
            messages: turns,
            temperature,
            max_tokens,
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            tools: tools.filter(|t| !t.is_empty()).map(|tools| {
                tools
                    .iter()
                    .map(|tool| {
                        json!({
                            "name": tool.name,
                            "description": tool.description,
                            "input_schema": tool.input_schema,
                        })
                    })
                    .collect()
            }),
        })
    }

    /// Offer Anthropic's server-side web search tool.
    pub fn with_web_search(mut self) -> Self {
        self.tools
            .get_or_insert_with(Vec::new)
            .push(json!({ "type": "web_search_20250305", "name": "web_search" }));
        self
    }
}

fn content_value(content: Option<&Content>) -> Value {
    match content {
        Some(Content::Text(text)) => Value::String(text.clone()),
        Some(Content::Blocks(blocks)) => Value::Array(blocks.clone()),
        None => Value::String(String::new()),
    }
}
