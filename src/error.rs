//! Error types
//!
//! Only configuration-level failures surface as [`Error`]. Failures that
//! belong to a single stream are logged and counted by its supervisor and
//! never abort the run.

use std::time::Duration;

use crate::registry::StreamId;
use crate::source::SourceError;

/// Result alias for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stream list could not be read
    #[error("failed to read stream list: {0}")]
    Io(#[from] std::io::Error),

    /// A stream list line could not be parsed
    #[error("invalid stream entry on line {line}: {reason}")]
    InvalidStreamEntry { line: usize, reason: String },

    /// Two entries share an identifier
    #[error("duplicate stream identifier: {0}")]
    DuplicateStream(StreamId),

    /// The stream list contained no entries
    #[error("no streams configured")]
    NoStreams,

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The supervisor was already stopped
    #[error("supervisor for {0} is stopped")]
    SupervisorStopped(StreamId),

    /// Collaborator failure surfaced to a caller
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl Error {
    pub(crate) fn zero_interval(what: &str, interval: Duration) -> Self {
        Error::InvalidConfig(format!("{what} must be positive, got {interval:?}"))
    }
}
