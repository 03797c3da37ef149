//! Supervisor configuration

use std::time::Duration;

use crate::error::{Error, Result};

/// Consecutive zero-fps windows before a reconnect
pub const DEFAULT_RECONNECT_THRESHOLD: u32 = 5;

/// Default sampling window
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Per-stream supervision options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Length of one sampling window
    pub sample_interval: Duration,

    /// Zero-fps windows in a row that trigger a reconnect
    pub reconnect_threshold: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            reconnect_threshold: DEFAULT_RECONNECT_THRESHOLD,
        }
    }
}

impl SupervisorConfig {
    /// Set the sampling window
    pub fn sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Set the reconnect threshold
    pub fn reconnect_threshold(mut self, windows: u32) -> Self {
        self.reconnect_threshold = windows;
        self
    }

    /// Reject values the sampling loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval.is_zero() {
            return Err(Error::zero_interval("sample interval", self.sample_interval));
        }
        if self.reconnect_threshold == 0 {
            return Err(Error::InvalidConfig(
                "reconnect threshold must be at least one window".into(),
            ));
        }
        Ok(())
    }
}
