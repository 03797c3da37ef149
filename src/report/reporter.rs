//! Periodic status reporter

use std::io::{self, Write};
use std::sync::Arc;

use chrono::Local;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::registry::StatusRegistry;

use super::config::ReporterConfig;
use super::render::{render_line, TIMESTAMP_FORMAT};

/// Renders a registry snapshot to an output sink every interval
pub struct Reporter<W = Box<dyn Write + Send>> {
    registry: Arc<StatusRegistry>,
    config: ReporterConfig,
    out: W,
}

impl<W: Write + Send> Reporter<W> {
    /// Create a reporter writing to `out`
    pub fn new(registry: Arc<StatusRegistry>, config: ReporterConfig, out: W) -> Self {
        Self {
            registry,
            config,
            out,
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Render and write a single line
    pub fn report_once(&mut self) -> io::Result<()> {
        let snapshot = self.registry.snapshot();
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let line = render_line(&snapshot, &timestamp, &self.config);

        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    /// Report every interval until `cancel` fires, then hand back the sink
    ///
    /// Write failures are logged and the loop keeps going.
    pub async fn run_loop(mut self, cancel: CancellationToken) -> W {
        let period = self.config.interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !cancel.is_cancelled() {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.report_once() {
                        tracing::warn!(error = %e, "Failed to write status line");
                    }
                }
            }
        }

        tracing::debug!("Reporter stopped");
        self.out
    }
}
