//! OpenAI-compatible LLM provider.
//!
//! Covers OpenAI, OpenRouter, DeepSeek, Ollama and any other service
//! exposing the OpenAI chat completions API.

use compact_str::CompactString;
use llm::{Client, HttpProvider, Result};
pub use request::Request;
pub use response::decode;
use std::time::Duration;

mod provider;
mod request;
mod response;

/// OpenAI-compatible base URLs.
pub mod endpoint {
    /// OpenAI.
    pub const OPENAI: &str = "https://api.openai.com/v1";
    /// OpenRouter aggregator.
    pub const OPENROUTER: &str = "https://openrouter.ai/api/v1";
    /// DeepSeek.
    pub const DEEPSEEK: &str = "https://api.deepseek.com";
    /// Ollama local server.
    pub const OLLAMA: &str = "http://localhost:11434/v1";
}

/// An OpenAI-compatible LLM provider.
///
/// Each call is a fresh request on the shared `reqwest::Client`; clones
/// share the client's connection pool.
#[derive(Clone, Debug)]
pub struct OpenAI {
    /// The HTTP client.
    pub client: Client,
    /// Chat completions endpoint and auth headers.
    http: HttpProvider,
    /// The model identifier sent with every request.
    model: CompactString,
    /// Whether to ask the upstream for web search.
    web_search: bool,
}

impl OpenAI {
    /// Create a provider targeting the OpenAI API.
    pub fn api(client: Client, key: &str, model: &str) -> Result<Self> {
        Self::custom(client, key, model, endpoint::OPENAI)
    }

    /// Create a provider targeting OpenRouter.
    pub fn openrouter(client: Client, key: &str, model: &str) -> Result<Self> {
        Self::custom(client, key, model, endpoint::OPENROUTER)
    }

    /// Create a provider targeting the DeepSeek API.
    pub fn deepseek(client: Client, key: &str, model: &str) -> Result<Self> {
        Self::custom(client, key, model, endpoint::DEEPSEEK)
    }

    /// Create a provider targeting a local Ollama instance (no API key).
    pub fn ollama(client: Client, model: &str, base_url: Option<&str>) -> Self {
        let base = base_url.unwrap_or(endpoint::OLLAMA);
        Self {
            client,
            http: HttpProvider::no_auth(&chat_endpoint(base)),
            model: model.into(),
            web_search: false,
        }
    }

    /// Create a provider targeting a custom OpenAI-compatible base URL.
    pub fn custom(client: Client, key: &str, model: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            http: HttpProvider::bearer(key, &chat_endpoint(base_url))?,
            model: model.into(),
            web_search: false,
        })
    }

    /// Enable or disable upstream web search.
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// Get the chat completions endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    /// Get the transport, for header inspection.
    pub fn http(&self) -> &HttpProvider {
        &self.http
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}
