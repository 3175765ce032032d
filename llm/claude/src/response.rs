//! Decoding of Anthropic Messages API responses.

use compact_str::CompactString;
use llm::{ChatResponse, Content, Error, Message, Result, ToolCall, Usage};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw Anthropic non-streaming response.
#[derive(Deserialize)]
struct AnthropicResponse {
    id: CompactString,
    #[serde(default)]
    model: Option<CompactString>,
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<CompactString>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse {
        id: CompactString,
        name: CompactString,
        input: Value,
    },
    /// Server tool traffic, citations and future block types.
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Decode an Anthropic messages body into a [`ChatResponse`].
///
/// Text blocks are concatenated as-is, tool_use blocks become tool calls
/// in block order, other block types are skipped.
pub fn decode(body: &str) -> Result<ChatResponse> {
    let raw: AnthropicResponse = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("unexpected anthropic response: {e}"), body))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();
    for block in raw.content {
        match block {
            ContentBlock::Text { text: part } => text.push_str(&part),
            ContentBlock::ToolUse { id, name, input } => {
                let Value::Object(parameters) = input else {
                    return Err(Error::decode(
                        format!("input of tool_use '{name}' is not an object"),
                        body,
                    ));
                };
                let call = ToolCall::new(id, name, parameters)
                    .map_err(|e| Error::decode(e.to_string(), body))?;
                tool_calls.push(call);
            }
            ContentBlock::Other => tracing::trace!("skipping unsupported content block"),
        }
    }

    let content = (!text.is_empty() || tool_calls.is_empty()).then_some(Content::Text(text));
    let message = Message::assistant_with_tools(content, tool_calls);
    let usage = Usage {
        extra: raw.usage.extra,
        ..Usage::new(raw.usage.input_tokens, raw.usage.output_tokens)
    };

    Ok(ChatResponse::new(
        raw.id,
        raw.model,
        message,
        usage,
        raw.stop_reason,
    ))
}
