//! Canonical chat model shared by every relay provider.
//!
//! Provides the provider-independent types: [`Message`], [`ToolCall`],
//! [`Tool`], [`ChatResponse`], the [`Error`] taxonomy, the [`ChatProvider`]
//! trait implemented by each upstream family, and [`HttpProvider`], the
//! JSON-over-HTTP transport the family adapters share.

pub use error::{Error, Result};
pub use http::{DEFAULT_TIMEOUT, HttpProvider};
pub use message::{Content, Message, Role, ToolCall};
pub use provider::{ChatProvider, check_request};
pub use reqwest::{self, Client};
pub use response::{ChatResponse, Usage};
pub use tool::{Tool, validate_tools};

mod error;
mod http;
mod message;
mod provider;
mod response;
mod tool;
