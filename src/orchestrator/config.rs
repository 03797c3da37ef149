//! Monitor configuration

use std::time::Duration;

use crate::error::Result;
use crate::report::ReporterConfig;
use crate::supervisor::SupervisorConfig;

/// Default bounded run length
pub const DEFAULT_RUN_DURATION: Duration = Duration::from_secs(300);

/// Options for a whole monitoring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Applied to every stream
    pub supervisor: SupervisorConfig,

    /// Status line output
    pub reporter: ReporterConfig,

    /// Stop after this long (None = only on external request)
    pub run_duration: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            supervisor: SupervisorConfig::default(),
            reporter: ReporterConfig::default(),
            run_duration: Some(DEFAULT_RUN_DURATION),
        }
    }
}

impl MonitorConfig {
    /// Use the same interval for sampling and reporting
    pub fn interval(self, interval: Duration) -> Self {
        self.sample_interval(interval).report_interval(interval)
    }

    /// Set the sampling window
    pub fn sample_interval(mut self, interval: Duration) -> Self {
        self.supervisor = self.supervisor.sample_interval(interval);
        self
    }

    /// Set the report interval
    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.reporter = self.reporter.interval(interval);
        self
    }

    /// Set the reconnect threshold in windows
    pub fn reconnect_threshold(mut self, windows: u32) -> Self {
        self.supervisor = self.supervisor.reconnect_threshold(windows);
        self
    }

    /// Set the degraded display floor in fps
    pub fn degraded_below(mut self, fps: u64) -> Self {
        self.reporter = self.reporter.degraded_below(fps);
        self
    }

    /// Enable or disable highlighting
    pub fn colored(mut self, colored: bool) -> Self {
        self.reporter = self.reporter.colored(colored);
        self
    }

    /// Set the run duration
    pub fn run_duration(mut self, duration: Option<Duration>) -> Self {
        self.run_duration = duration;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.supervisor.validate()?;
        self.reporter.validate()
    }
}
