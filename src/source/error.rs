//! Source error types
//!
//! Failures reported by a decoding collaborator. None of these are fatal to
//! the run: the owning supervisor logs them and keeps monitoring.

/// Error type for collaborator operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The location could not be parsed
    #[error("invalid source location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },

    /// No collaborator handles this URI scheme
    #[error("unsupported source scheme: {0}")]
    UnsupportedScheme(String),

    /// The negotiated encoding has no processing path
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// The collaborator could not be built
    #[error("failed to build source: {0}")]
    Construction(String),

    /// State change to playing failed
    #[error("failed to start source: {0}")]
    StartFailed(String),

    /// State change to stopped failed
    #[error("failed to stop source: {0}")]
    StopFailed(String),

    /// A frame unit could not be pulled
    #[error("frame delivery failed: {0}")]
    Delivery(String),
}

impl SourceError {
    pub(crate) fn invalid_location(location: &str, reason: impl Into<String>) -> Self {
        SourceError::InvalidLocation {
            location: location.to_string(),
            reason: reason.into(),
        }
    }
}
