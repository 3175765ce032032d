//! Error taxonomy for every relay operation.
//!
//! Variants are grouped by where they surface: configuration (client
//! construction), encoding validation (before any network call), transport
//! (the HTTP round trip) and decoding (an unexpected response shape). None
//! of them are recovered locally; callers decide whether to retry with
//! [`Error::is_retryable`].

/// Result alias used across the relay crates.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The unified error type returned by models and providers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The provider family name did not match any known family.
    #[error("unsupported provider '{name}', expected one of: {}", .supported.join(", "))]
    UnsupportedProvider {
        /// The offending family name.
        name: String,
        /// The legal family names.
        supported: &'static [&'static str],
    },

    /// A role string outside `user | assistant | system | tool`.
    #[error("invalid role '{0}', expected one of: user, assistant, system, tool")]
    InvalidRole(String),

    /// An API key or header value that cannot be sent over HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A chat request without any message.
    #[error("messages must not be empty")]
    EmptyMessages,

    /// A `tool` message missing its correlation id or tool name, or a
    /// message carrying fields its role does not allow.
    #[error("invalid_tool_message: {reason}")]
    InvalidToolMessage {
        /// What is wrong with the message.
        reason: &'static str,
    },

    /// A tool call without id or name.
    #[error("invalid tool call: {0}")]
    InvalidToolCall(&'static str),

    /// A tool descriptor without name or description.
    #[error("invalid tool '{name}': {reason}")]
    InvalidTool {
        /// The descriptor name (may be empty).
        name: String,
        /// What is wrong with the descriptor.
        reason: &'static str,
    },

    /// Two descriptors with the same name in one request.
    #[error("duplicate tool '{0}' in request")]
    DuplicateTool(String),

    /// The upstream answered with a non-2xx status.
    #[error("http error {status}: {body}")]
    Http {
        /// The upstream status code.
        status: u16,
        /// The raw upstream body.
        body: String,
    },

    /// The per-call wire timeout elapsed.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Connection-level failure before a status was received.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body did not have the shape the family promises.
    #[error("failed to decode response: {message}")]
    Decode {
        /// What did not match.
        message: String,
        /// The raw body, for diagnostics.
        body: String,
    },

    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether a caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Transport(e) => e.is_connect() || e.is_request(),
            Self::Http { status, .. } => matches!(status, 408 | 429 | 500..=599),
            _ => false,
        }
    }

    /// The upstream status code, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a [`Error::Decode`] keeping the raw body.
    pub fn decode(message: impl Into<String>, body: &str) -> Self {
        Self::Decode {
            message: message.into(),
            body: body.to_owned(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Transport(e)
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(e.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderName> for Error {
    fn from(e: reqwest::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_provider_names_value_and_choices() {
        let err = Error::UnsupportedProvider {
            name: "gemini".into(),
            supported: &["openai", "anthropic"],
        };
        let msg = err.to_string();
        assert!(msg.contains("'gemini'"));
        assert!(msg.contains("openai, anthropic"));
    }

    #[test]
    fn invalid_tool_message_display() {
        let err = Error::InvalidToolMessage {
            reason: "missing tool_call_id",
        };
        assert!(err.to_string().starts_with("invalid_tool_message"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn http_retryability_follows_status() {
        let http = |status| Error::Http {
            status,
            body: String::new(),
        };
        assert!(http(429).is_retryable());
        assert!(http(503).is_retryable());
        assert!(!http(400).is_retryable());
        assert!(!http(401).is_retryable());
        assert_eq!(http(404).status(), Some(404));
    }
}
