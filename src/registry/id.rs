//! Stream identifiers

use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a monitored stream (e.g. "cam0")
///
/// Ordering is lexicographic on the identifier text, which is the order
/// streams appear in rendered reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// Create a new stream identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Default identifier for the entry at `index` in input order
    pub fn indexed(index: usize) -> Self {
        Self(format!("cam{}", index))
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StreamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for StreamId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
