//! Canonical chat completion response

use crate::{Message, ToolCall};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token accounting for one completion.
///
/// Providers report different extras (cache counters, reasoning tokens);
/// those are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Prompt plus completion
    #[serde(default)]
    pub total_tokens: u32,

    /// Provider-specific fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Usage {
    /// Create usage from prompt and completion counts.
    ///
    /// The total saturates at `u32::MAX`.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
            extra: Map::new(),
        }
    }
}

/// A decoded chat completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    /// Provider-assigned completion id
    pub id: CompactString,

    /// The model that produced the completion, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<CompactString>,

    /// The assistant message
    pub message: Message,

    /// Mirror of `message.tool_calls`, `None` when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Token usage
    pub usage: Usage,

    /// The provider's terminal-state label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<CompactString>,
}

impl ChatResponse {
    /// Assemble a response around a decoded assistant message.
    pub fn new(
        id: impl Into<CompactString>,
        model: Option<CompactString>,
        message: Message,
        usage: Usage,
        finish_reason: Option<CompactString>,
    ) -> Self {
        let tool_calls = (!message.tool_calls.is_empty()).then(|| message.tool_calls.clone());
        Self {
            id: id.into(),
            model,
            message,
            tool_calls,
            usage,
            finish_reason,
        }
    }

    /// The assistant text, empty when the model only called tools.
    pub fn content(&self) -> String {
        self.message.text()
    }

    /// Whether the model asked for tool execution.
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.is_some()
    }
}
