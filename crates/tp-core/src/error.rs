//! Unified error type for track mapping and selection.
//!
//! A failed capability query aborts the whole selection pass; invalid
//! parameters are rejected before any selector state changes. Finding no
//! eligible track is *not* an error and never surfaces here.

/// Unified error type covering all failure modes in trackpilot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A renderer failed to answer a capability query.
    #[error("Capability query failed [{renderer}]: {message}")]
    CapabilityQuery {
        /// Name of the renderer that failed.
        renderer: String,
        /// Human-readable error description.
        message: String,
    },

    /// A parameter snapshot failed validation.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A track group could not be constructed.
    #[error("Invalid track group: {0}")]
    InvalidTrackGroup(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::CapabilityQuery`].
    pub fn capability_query(renderer: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CapabilityQuery {
            renderer: renderer.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidParameters`].
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Error::InvalidParameters(message.into())
    }

    /// Whether this error aborts a selection pass (as opposed to being
    /// rejected at an API boundary).
    pub fn is_fatal_to_pass(&self) -> bool {
        matches!(self, Error::CapabilityQuery { .. } | Error::Io { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
