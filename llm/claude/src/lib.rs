//! Claude (Anthropic) LLM provider.
//!
//! Implements the Anthropic Messages API, which differs from the OpenAI
//! chat completions format in message structure: system prompts live in a
//! top-level field, tool calls and tool results are content blocks.

use compact_str::CompactString;
use llm::{Client, HttpProvider, Result};
use parking_lot::Mutex;
pub use request::Request;
pub use response::decode;
use std::{sync::Arc, time::Duration};

mod provider;
mod request;
mod response;

/// The Anthropic API base URL.
pub const BASE_URL: &str = "https://api.anthropic.com/v1";

/// The Anthropic API version header value.
pub const API_VERSION: &str = "2023-06-01";

/// The Claude LLM provider.
///
/// Holds one pooled `reqwest::Client`, created on first use and shared by
/// every clone. [`Claude::close`] drops it; the next call creates a new one.
#[derive(Clone, Debug)]
pub struct Claude {
    /// The pooled HTTP client, `None` until first use or after close.
    pool: Arc<Mutex<Option<Client>>>,
    /// Messages endpoint and headers (x-api-key, anthropic-version).
    http: HttpProvider,
    /// The model identifier sent with every request.
    model: CompactString,
    /// Whether to offer the web search server tool.
    web_search: bool,
}

impl Claude {
    /// Create a provider targeting the Anthropic API.
    pub fn anthropic(key: &str, model: &str) -> Result<Self> {
        Self::custom(key, model, BASE_URL)
    }

    /// Create a provider targeting a custom Anthropic-compatible base URL.
    pub fn custom(key: &str, model: &str, base_url: &str) -> Result<Self> {
        let endpoint = format!("{}/messages", base_url.trim_end_matches('/'));
        let http = HttpProvider::custom_header("x-api-key", key, &endpoint)?
            .with_header("anthropic-version", API_VERSION)?;
        Ok(Self {
            pool: Arc::new(Mutex::new(None)),
            http,
            model: model.into(),
            web_search: false,
        })
    }

    /// Seed the pool with an existing client instead of creating one lazily.
    pub fn with_client(self, client: Client) -> Self {
        *self.pool.lock() = Some(client);
        self
    }

    /// Enable or disable the web search server tool.
    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    /// The pooled client, created on first use.
    ///
    /// Concurrent first callers serialize on the lock; exactly one client
    /// is built and the rest reuse it.
    pub fn client(&self) -> Result<Client> {
        let mut pool = self.pool.lock();
        if let Some(client) = pool.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder().build()?;
        tracing::debug!(endpoint = self.http.endpoint(), "created pooled anthropic client");
        *pool = Some(client.clone());
        Ok(client)
    }

    /// Release the pooled client.
    ///
    /// In-flight requests keep their own handle and finish normally.
    pub fn close(&self) {
        if self.pool.lock().take().is_some() {
            tracing::debug!("closed pooled anthropic client");
        }
    }

    /// Whether a pooled client is currently held.
    pub fn is_open(&self) -> bool {
        self.pool.lock().is_some()
    }

    /// Get the messages endpoint URL.
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
