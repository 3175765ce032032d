//! Decoding of OpenAI chat completion responses.

use crate::request::WireToolCall;
use compact_str::CompactString;
use llm::{ChatResponse, Content, Error, Message, Result, ToolCall, Usage};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw OpenAI non-streaming response.
#[derive(Deserialize)]
struct WireResponse {
    id: CompactString,
    #[serde(default)]
    model: Option<CompactString>,
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireReply,
    #[serde(default)]
    finish_reason: Option<CompactString>,
}

#[derive(Deserialize)]
struct WireReply {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

/// Decode an OpenAI chat completion body into a [`ChatResponse`].
///
/// Only the first choice is read. Tool-call arguments are parsed back into
/// a parameter map; an empty argument string is an empty map.
pub fn decode(body: &str) -> Result<ChatResponse> {
    let raw: WireResponse = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("unexpected openai response: {e}"), body))?;
    let Some(choice) = raw.choices.into_iter().next() else {
        return Err(Error::decode("response has no choices", body));
    };

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| decode_call(call, body))
        .collect::<Result<Vec<_>>>()?;

    let content = choice.message.content.map(Content::Text);
    let message = Message::assistant_with_tools(content, tool_calls);

    let mut usage = raw.usage.unwrap_or_default();
    if usage.total_tokens == 0 {
        usage.total_tokens = usage.prompt_tokens.saturating_add(usage.completion_tokens);
    }

    Ok(ChatResponse::new(
        raw.id,
        raw.model,
        message,
        usage,
        choice.finish_reason,
    ))
}

fn decode_call(call: WireToolCall, body: &str) -> Result<ToolCall> {
    let arguments = call.function.arguments.trim();
    let parameters = if arguments.is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(arguments) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(Error::decode(
                    format!("arguments of '{}' are not an object: {other}", call.function.name),
                    body,
                ));
            }
            Err(e) => {
                return Err(Error::decode(
                    format!("arguments of '{}' are not json: {e}", call.function.name),
                    body,
                ));
            }
        }
    };
    ToolCall::new(call.id, call.function.name, parameters)
        .map_err(|e| Error::decode(e.to_string(), body))
}
