//! Reporter configuration

use std::time::Duration;

use crate::error::{Error, Result};

/// Entries below this fps are highlighted
pub const DEFAULT_DEGRADED_BELOW: u64 = 5;

/// Report rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Time between rendered lines
    pub interval: Duration,

    /// Display floor separating healthy from degraded entries
    ///
    /// Unrelated to the supervisor's reconnect threshold, which counts
    /// windows rather than frames.
    pub degraded_below: u64,

    /// Highlight degraded entries with ANSI colors
    pub colored: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            degraded_below: DEFAULT_DEGRADED_BELOW,
            colored: true,
        }
    }
}

impl ReporterConfig {
    /// Set the report interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the degraded display floor
    pub fn degraded_below(mut self, fps: u64) -> Self {
        self.degraded_below = fps;
        self
    }

    /// Enable or disable highlighting
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::zero_interval("report interval", self.interval));
        }
        Ok(())
    }
}
