//! Tool registry for relay.
//!
//! A [`Capability`] pairs a [`Tool`] descriptor, shown to the model, with
//! the code that runs when the model calls it. The [`ToolRegistry`] owns
//! the capabilities, lists their descriptors for a request and executes
//! the [`ToolCall`]s a response carries.
//!
//! ```rust,ignore
//! use relay_tool::ToolRegistry;
//!
//! #[derive(serde::Deserialize, schemars::JsonSchema)]
//! struct Double { value: i64 }
//!
//! let mut registry = ToolRegistry::new();
//! registry.register_fn("double", "Double an integer", |p: Double| async move {
//!     Ok(serde_json::json!({ "result": p.value * 2 }))
//! })?;
//! let tools = registry.descriptors();
//! let response = client.chat(&messages, Some(&tools)).await?;
//! messages.extend(registry.dispatch_all(response.message.tool_calls.as_slice()).await);
//! ```

pub use capability::{BoxFuture, Capability, FnTool};
pub use error::ToolError;
pub use llm::{Tool, ToolCall};
pub use registry::ToolRegistry;

mod capability;
mod error;
mod registry;
