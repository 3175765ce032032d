//! `ChatProvider` implementation for the OpenAI-compatible provider.

use super::{OpenAI, Request, decode};
use llm::{ChatProvider, ChatResponse, Message, Result, Tool, check_request};

impl ChatProvider for OpenAI {
    async fn chat_completion(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<ChatResponse> {
        check_request(messages, tools)?;
        let mut body = Request::new(&self.model, messages, tools, temperature, max_tokens)?;
        if self.web_search {
            body = body.with_web_search();
        }

        let text = self.http.send(&self.client, &body).await?;
        let response = decode(&text)?;
        tracing::debug!(
            id = %response.id,
            finish_reason = ?response.finish_reason,
            tool_calls = response.message.tool_calls.len(),
            "openai completion"
        );
        Ok(response)
    }
}
