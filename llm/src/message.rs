//! Canonical conversation turns

use crate::{Error, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// A message in the chat
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    /// The role of the message
    pub role: Role,

    /// The content of the message, absent when the turn only carries
    /// tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// The tool call this message answers (tool role only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<CompactString>,

    /// The name of the invoked tool (tool role only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CompactString>,

    /// The tool calls requested by the model (assistant role only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    /// Create a message from a raw role string.
    ///
    /// Fails on any role outside the four legal values, and on `tool`,
    /// which needs a call id and name (use [`Message::tool`]).
    pub fn new(role: &str, content: impl Into<Content>) -> Result<Self> {
        let role: Role = role.parse()?;
        if role == Role::Tool {
            return Err(Error::InvalidToolMessage {
                reason: "tool messages require tool_call_id and name",
            });
        }
        Ok(Self::bare(role, Some(content.into())))
    }

    /// Create a new system message
    pub fn system(content: impl Into<Content>) -> Self {
        Self::bare(Role::System, Some(content.into()))
    }

    /// Create a new user message
    pub fn user(content: impl Into<Content>) -> Self {
        Self::bare(Role::User, Some(content.into()))
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<Content>) -> Self {
        Self::bare(Role::Assistant, Some(content.into()))
    }

    /// Create an assistant message carrying tool calls, with optional text.
    pub fn assistant_with_tools(content: Option<Content>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::bare(Role::Assistant, content)
        }
    }

    /// Create a tool result answering `call_id`, produced by tool `name`.
    pub fn tool(
        content: impl Into<Content>,
        call_id: impl Into<CompactString>,
        name: impl Into<CompactString>,
    ) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            name: Some(name.into()),
            ..Self::bare(Role::Tool, Some(content.into()))
        }
    }

    fn bare(role: Role, content: Option<Content>) -> Self {
        Self {
            role,
            content,
            tool_call_id: None,
            name: None,
            tool_calls: Vec::new(),
        }
    }

    /// Check the per-role field invariants.
    ///
    /// Messages built with the constructors always pass; messages
    /// deserialized from a stored history may not.
    pub fn validate(&self) -> Result<()> {
        let missing = |field: &Option<CompactString>| field.as_deref().is_none_or(str::is_empty);
        let reason = match self.role {
            Role::Tool if missing(&self.tool_call_id) => Some("tool message is missing tool_call_id"),
            Role::Tool if missing(&self.name) => Some("tool message is missing name"),
            Role::Tool => None,
            _ if self.tool_call_id.is_some() || self.name.is_some() => {
                Some("only tool messages carry tool_call_id and name")
            }
            _ => None,
        }
        .or_else(|| {
            (self.role != Role::Assistant && !self.tool_calls.is_empty())
                .then_some("only assistant messages carry tool_calls")
        });

        match reason {
            Some(reason) => Err(Error::InvalidToolMessage { reason }),
            None => Ok(()),
        }
    }

    /// The plain text of the message, empty when there is no content.
    pub fn text(&self) -> String {
        self.content.as_ref().map(Content::text).unwrap_or_default()
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The user role
    User,
    /// The assistant role
    Assistant,
    /// The system role
    System,
    /// The tool role
    Tool,
}

impl Role {
    /// The wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Tool => "tool",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            "tool" => Ok(Self::Tool),
            other => Err(Error::InvalidRole(other.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message content: plain text or a sequence of structured blocks.
///
/// Blocks are opaque JSON objects handed to the provider as-is; they are
/// used for tool results that do not fit in a string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text.
    Text(String),
    /// Structured content blocks.
    Blocks(Vec<Value>),
}

impl Content {
    /// The text of the content.
    ///
    /// For blocks, concatenates the `text` field of every `{"type": "text"}`
    /// block and ignores the rest.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect(),
        }
    }

    /// The plain text, if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Blocks(_) => None,
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Value>> for Content {
    fn from(blocks: Vec<Value>) -> Self {
        Self::Blocks(blocks)
    }
}

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToolCall {
    /// Opaque correlation token assigned by the provider
    pub id: CompactString,

    /// The tool to invoke
    pub name: CompactString,

    /// Arguments keyed by parameter name
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ToolCall {
    /// Create a tool call, rejecting an empty id or name.
    pub fn new(
        id: impl Into<CompactString>,
        name: impl Into<CompactString>,
        parameters: Map<String, Value>,
    ) -> Result<Self> {
        let call = Self {
            id: id.into(),
            name: name.into(),
            parameters,
        };
        if call.id.is_empty() {
            return Err(Error::InvalidToolCall("id must not be empty"));
        }
        if call.name.is_empty() {
            return Err(Error::InvalidToolCall("name must not be empty"));
        }
        Ok(call)
    }

    /// The parameters serialized as a JSON string.
    pub fn arguments(&self) -> String {
        Value::Object(self.parameters.clone()).to_string()
    }
}
