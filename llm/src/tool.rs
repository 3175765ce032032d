//! Tool descriptors handed to the model

use crate::{Error, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A capability the model may call.
///
/// `input_schema` is a JSON-Schema-shaped value; its shape varies per tool
/// and is never interpreted here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tool {
    /// The name of the tool
    pub name: CompactString,

    /// What the tool does, read by the model
    pub description: String,

    /// The accepted parameters
    pub input_schema: Value,
}

impl Tool {
    /// Create a descriptor, rejecting an empty name or description.
    pub fn new(
        name: impl Into<CompactString>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Result<Self> {
        let tool = Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        };
        tool.validate()?;
        Ok(tool)
    }

    /// Check that the descriptor has a name and a description.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.name.is_empty() {
            "name must not be empty"
        } else if self.description.trim().is_empty() {
            "description must not be empty"
        } else {
            return Ok(());
        };
        Err(Error::InvalidTool {
            name: self.name.to_string(),
            reason,
        })
    }
}

/// Validate a request's tool list: every descriptor well formed, every
/// name unique.
pub fn validate_tools(tools: &[Tool]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for tool in tools {
        tool.validate()?;
        if !seen.insert(tool.name.as_str()) {
            return Err(Error::DuplicateTool(tool.name.to_string()));
        }
    }
    Ok(())
}
