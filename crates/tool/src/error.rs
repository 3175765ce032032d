//! Tool registry errors.

use compact_str::CompactString;

/// An error raised while registering or executing a tool.
///
/// Every variant carries the tool name.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No capability is registered under the name.
    #[error("tool '{0}' is not registered")]
    NotFound(CompactString),

    /// A different capability already holds the name.
    #[error("tool '{0}' is already registered")]
    Duplicate(CompactString),

    /// The capability's descriptor is malformed.
    #[error("invalid tool '{name}': {source}")]
    Invalid {
        /// The descriptor name (may be empty).
        name: CompactString,
        /// The descriptor check that failed.
        #[source]
        source: llm::Error,
    },

    /// The parameters were rejected before the call.
    #[error("tool '{name}' rejected its parameters: {source}")]
    Validation {
        /// The tool name.
        name: CompactString,
        /// The reason given by the capability.
        #[source]
        source: anyhow::Error,
    },

    /// The capability failed while running.
    #[error("tool '{name}' failed: {source}")]
    Execution {
        /// The tool name.
        name: CompactString,
        /// The failure reported by the capability.
        #[source]
        source: anyhow::Error,
    },
}

impl ToolError {
    /// The name of the tool the error is about.
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound(name) | Self::Duplicate(name) => name,
            Self::Invalid { name, .. }
            | Self::Validation { name, .. }
            | Self::Execution { name, .. } => name,
        }
    }
}
