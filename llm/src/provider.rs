//! Provider abstraction implemented by each upstream family

use crate::{ChatResponse, Error, Message, Result, Tool, validate_tools};

/// A chat-completion backend.
///
/// Each upstream API family is one concrete implementation. Constructors
/// are inherent methods on each provider, never called polymorphically.
/// Implementations are cheap to clone and safe to call concurrently.
pub trait ChatProvider: Sized + Clone + Send + Sync {
    /// Send one chat completion request.
    ///
    /// `temperature` and `max_tokens` are passed through unmodified.
    fn chat_completion(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
        temperature: f64,
        max_tokens: u32,
    ) -> impl Future<Output = Result<ChatResponse>> + Send;
}

/// Checks shared by every family before encoding: at least one message and
/// a well-formed, duplicate-free tool list.
pub fn check_request(messages: &[Message], tools: Option<&[Tool]>) -> Result<()> {
    if messages.is_empty() {
        return Err(Error::EmptyMessages);
    }
    validate_tools(tools.unwrap_or_default())
}
