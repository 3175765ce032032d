//! Unified `Provider` enum with enum dispatch over the wire families.
//!
//! `build_provider()` matches on [`ProviderKind`] and calls the family's
//! constructor with the preset base URL, unless one is overridden.

use crate::{Options, ProviderKind};
use claude::Claude;
use llm::{ChatProvider, ChatResponse, Client, Message, Result, Tool};
use openai::{OpenAI, endpoint};

/// A resolved upstream provider.
#[derive(Clone, Debug)]
pub enum Provider {
    /// OpenAI-compatible API (OpenAI, OpenRouter, DeepSeek, Ollama).
    OpenAI(OpenAI),
    /// Anthropic Messages API.
    Claude(Claude),
}

impl Provider {
    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAI(p) => p.model(),
            Self::Claude(p) => p.model(),
        }
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::OpenAI(p) => p.endpoint(),
            Self::Claude(p) => p.endpoint(),
        }
    }

    /// Release pooled connections; a later call re-creates them.
    pub fn close(&self) {
        match self {
            Self::OpenAI(_) => {}
            Self::Claude(p) => p.close(),
        }
    }
}

/// Construct the provider for `kind`.
pub fn build_provider(
    kind: ProviderKind,
    api_key: &str,
    model: &str,
    options: &Options,
) -> Result<Provider> {
    let base_url = options.base_url.as_deref();
    let provider = match kind {
        ProviderKind::Anthropic => {
            let claude = match base_url {
                Some(url) => Claude::custom(api_key, model, url)?,
                None => Claude::anthropic(api_key, model)?,
            };
            let claude = claude.with_web_search(options.web_search);
            Provider::Claude(match options.timeout {
                Some(timeout) => claude.with_timeout(timeout),
                None => claude,
            })
        }
        ProviderKind::Ollama => {
            let client = Client::builder().build()?;
            openai_with(OpenAI::ollama(client, model, base_url), options)
        }
        ProviderKind::OpenAI | ProviderKind::OpenRouter | ProviderKind::DeepSeek => {
            let preset = match kind {
                ProviderKind::OpenRouter => endpoint::OPENROUTER,
                ProviderKind::DeepSeek => endpoint::DEEPSEEK,
                _ => endpoint::OPENAI,
            };
            let client = Client::builder().build()?;
            let openai = OpenAI::custom(client, api_key, model, base_url.unwrap_or(preset))?;
            openai_with(openai, options)
        }
    };

    tracing::debug!(%kind, model, endpoint = provider.endpoint(), "resolved provider");
    Ok(provider)
}

fn openai_with(openai: OpenAI, options: &Options) -> Provider {
    let openai = openai.with_web_search(options.web_search);
    Provider::OpenAI(match options.timeout {
        Some(timeout) => openai.with_timeout(timeout),
        None => openai,
    })
}

impl ChatProvider for Provider {
    async fn chat_completion(
        &self,
        messages: &[Message],
        tools: Option<&[Tool]>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<ChatResponse> {
        match self {
            Self::OpenAI(p) => {
                p.chat_completion(messages, tools, temperature, max_tokens)
                    .await
            }
            Self::Claude(p) => {
                p.chat_completion(messages, tools, temperature, max_tokens)
                    .await
            }
        }
    }
}
