//! Provider selection and client configuration.

use compact_str::CompactString;
use llm::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

/// Supported upstream providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProviderKind {
    /// OpenAI API.
    OpenAI,
    /// Anthropic Messages API.
    Anthropic,
    /// OpenRouter aggregator, OpenAI-compatible.
    OpenRouter,
    /// DeepSeek API, OpenAI-compatible.
    DeepSeek,
    /// Ollama local API, OpenAI-compatible, no key required.
    Ollama,
}

/// Wire protocol shared by a group of providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Chat completions (`/chat/completions`).
    OpenAI,
    /// Messages (`/messages`).
    Anthropic,
}

impl ProviderKind {
    /// Every accepted provider name.
    pub const SUPPORTED: &'static [&'static str] =
        &["openai", "anthropic", "openrouter", "deepseek", "ollama"];

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::OpenRouter => "openrouter",
            Self::DeepSeek => "deepseek",
            Self::Ollama => "ollama",
        }
    }

    /// The wire family this provider speaks.
    pub fn family(&self) -> Family {
        match self {
            Self::Anthropic => Family::Anthropic,
            Self::OpenAI | Self::OpenRouter | Self::DeepSeek | Self::Ollama => Family::OpenAI,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(name: &str) -> Result<Self> {
        Ok(match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAI,
            "anthropic" => Self::Anthropic,
            "openrouter" => Self::OpenRouter,
            "deepseek" => Self::DeepSeek,
            "ollama" => Self::Ollama,
            _ => {
                return Err(Error::UnsupportedProvider {
                    name: name.to_owned(),
                    supported: Self::SUPPORTED,
                });
            }
        })
    }
}

impl TryFrom<String> for ProviderKind {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-specific extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Override the provider's default base URL.
    pub base_url: Option<String>,
    /// Ask the upstream to ground answers with web search.
    pub web_search: bool,
    /// Per-call wire timeout, [`llm::DEFAULT_TIMEOUT`] when unset.
    pub timeout: Option<Duration>,
}

impl Options {
    /// Set the base URL override.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Enable or disable web search.
    pub fn web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client configuration, usually one table of a TOML file.
///
/// ```toml
/// provider = "anthropic"
/// model = "claude-sonnet-4-20250514"
/// api_key = "${ANTHROPIC_API_KEY}"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Which provider to use.
    pub provider: ProviderKind,
    /// Model identifier.
    pub model: CompactString,
    /// API key, empty for providers without auth.
    #[serde(default)]
    pub api_key: String,
    /// Optional base URL override for the provider endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whether to enable upstream web search.
    #[serde(default)]
    pub web_search: bool,
    /// Per-call timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Parse a TOML string, expanding `${VAR}` from the environment first.
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(&expand_env_vars(toml_str))
    }

    /// The provider extras carried by this config.
    pub fn options(&self) -> Options {
        Options {
            base_url: self.base_url.clone(),
            web_search: self.web_search,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Replace `${VAR}` with the value of the environment variable, or with
/// nothing when it is unset.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };
        if let Ok(value) = std::env::var(&after[..end]) {
            result.push_str(&value);
        }
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    result
}
