//! Relay client façade.
//!
//! [`Client`] decouples which provider answers from how it is called:
//! pick a provider by name, then call [`Client::chat`] with canonical
//! messages. Requests and responses are forwarded verbatim.
//!
//! ```rust,ignore
//! use relay_client::{Client, Options};
//! use llm::Message;
//!
//! let client = Client::new("anthropic", &key, "claude-sonnet-4-20250514", Options::default())?;
//! let response = client.chat(&[Message::user("hello")], None).await?;
//! println!("{}", response.content());
//! ```

pub use config::{ClientConfig, Family, Options, ProviderKind};
pub use llm::{ChatProvider, ChatResponse, Error, Message, Result, Tool, ToolCall};
pub use provider::{Provider, build_provider};

mod config;
mod provider;

/// Temperature used by [`Client::chat`].
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Completion budget used by [`Client::chat`].
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// A chat client bound to one provider and model.
///
/// Cheap to clone; clones share the provider's connections.
#[derive(Clone, Debug)]
pub struct Client {
    kind: ProviderKind,
    provider: Provider,
}

impl Client {
    /// Resolve `provider` (case-insensitive) and build its adapter.
    ///
    /// An unknown name fails with [`Error::UnsupportedProvider`] listing
    /// the accepted names.
    pub fn new(provider: &str, api_key: &str, model: &str, options: Options) -> Result<Self> {
        let kind: ProviderKind = provider.parse()?;
        Self::with_kind(kind, api_key, model, &options)
    }

    /// Build a client from a parsed configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_kind(
            config.provider,
            &config.api_key,
            &config.model,
            &config.options(),
        )
    }

    fn with_kind(kind: ProviderKind, api_key: &str, model: &str, options: &Options) -> Result<Self> {
        Ok(Self {
            kind,
            provider: build_provider(kind, api_key, model, options)?,
        })
    }

    /// Send a chat request with the default sampling settings.
    pub async fn chat(&self, messages: &[Message], tools: Option<&[Tool]>) -> Result<ChatResponse> {
        self.chat_with(messages, tools, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
            .await
    }

    /// Send a chat request with explicit sampling settings.
    pub async fn chat_with(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<ChatResponse> {
        self.provider
            .chat_completion(messages, tools, temperature, max_tokens)
            .await
    }

    /// The resolved provider kind.
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// The model identifier.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Release pooled connections held by the provider.
    pub fn close(&self) {
        self.provider.close();
    }
}
