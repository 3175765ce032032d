//! The tool registry.

use crate::{Capability, FnTool, ToolError};
use compact_str::CompactString;
use llm::{Message, Tool, ToolCall};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, future::Future, sync::Arc};

/// A registered capability and its cached descriptor.
#[derive(Clone)]
struct Entry {
    tool: Tool,
    capability: Arc<dyn Capability>,
}

/// Name-indexed set of capabilities.
///
/// Built once during setup with `&mut self`, then shared (e.g. behind an
/// `Arc`); every lookup and execution takes `&self`.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    /// Entries in registration order.
    entries: Vec<Entry>,
    /// Name to position in `entries`.
    index: BTreeMap<CompactString, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under its descriptor name.
    pub fn register(&mut self, capability: impl Capability + 'static) -> Result<(), ToolError> {
        self.register_shared(Arc::new(capability))
    }

    /// Register a shared capability.
    ///
    /// Registering the same `Arc` twice is a no-op; a different capability
    /// under a taken name fails with [`ToolError::Duplicate`].
    pub fn register_shared(&mut self, capability: Arc<dyn Capability>) -> Result<(), ToolError> {
        let tool = capability.descriptor();
        tool.validate().map_err(|source| ToolError::Invalid {
            name: tool.name.clone(),
            source,
        })?;

        if let Some(&at) = self.index.get(&tool.name) {
            if Arc::ptr_eq(&self.entries[at].capability, &capability) {
                return Ok(());
            }
            return Err(ToolError::Duplicate(tool.name));
        }

        tracing::debug!(tool = %tool.name, "registered tool");
        self.index.insert(tool.name.clone(), self.entries.len());
        self.entries.push(Entry { tool, capability });
        Ok(())
    }

    /// Register an async closure over typed parameters, see [`FnTool`].
    pub fn register_fn<P, F, Fut>(
        &mut self,
        name: impl Into<CompactString>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<(), ToolError>
    where
        P: JsonSchema + DeserializeOwned + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.register(FnTool::new(name, description, handler)?)
    }

    /// Get a capability by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Capability>, ToolError> {
        self.entry(name).map(|entry| entry.capability.clone())
    }

    /// Descriptors of every registered capability, in registration order.
    pub fn descriptors(&self) -> Vec<Tool> {
        self.entries.iter().map(|entry| entry.tool.clone()).collect()
    }

    /// Validate `params` and run the named capability.
    pub async fn execute(&self, name: &str, params: Map<String, Value>) -> Result<Value, ToolError> {
        let entry = self.entry(name)?;
        let name = &entry.tool.name;
        entry
            .capability
            .validate(&params)
            .map_err(|source| ToolError::Validation {
                name: name.clone(),
                source,
            })?;

        tracing::debug!(tool = %name, "executing tool");
        entry
            .capability
            .call(params)
            .await
            .map_err(|source| ToolError::Execution {
                name: name.clone(),
                source,
            })
    }

    /// Execute one tool call and wrap the outcome as the `tool` message
    /// answering it.
    ///
    /// Failures become the message text so the model can see them.
    pub async fn dispatch(&self, call: &ToolCall) -> Message {
        let content = match self.execute(&call.name, call.parameters.clone()).await {
            Ok(Value::String(text)) => text,
            Ok(value) => value.to_string(),
            Err(e) => {
                tracing::warn!(tool = %call.name, call = %call.id, "tool call failed: {e}");
                format!("error: {e}")
            }
        };
        Message::tool(content, call.id.clone(), call.name.clone())
    }

    /// Execute tool calls concurrently; messages come back in call order.
    pub async fn dispatch_all(&self, calls: &[ToolCall]) -> Vec<Message> {
        futures_util::future::join_all(calls.iter().map(|call| self.dispatch(call))).await
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a capability is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tool.name.as_str())
    }

    fn entry(&self, name: &str) -> Result<&Entry, ToolError> {
        self.index
            .get(name)
            .map(|&at| &self.entries[at])
            .ok_or_else(|| ToolError::NotFound(name.into()))
    }
}
