//! Monitoring run coordinator
//!
//! Builds one supervisor per configured stream, runs every sampling loop
//! and the reporter as separate tasks, and tears everything down in order:
//! supervisors first, reporter last.

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::registry::{StatusRegistry, StreamId};
use crate::report::Reporter;
use crate::source::SourceFactory;
use crate::stats::StreamStats;
use crate::supervisor::StreamSupervisor;

use super::config::MonitorConfig;
use super::streams::StreamSpec;

/// A stream that could not be monitored this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStream {
    pub id: StreamId,
    pub reason: String,
}

/// Outcome of a finished run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Final statistics of every monitored stream, in configuration order
    pub monitored: Vec<(StreamId, StreamStats)>,
    /// Streams whose collaborator could not be built
    pub skipped: Vec<SkippedStream>,
}

impl RunSummary {
    /// Total reconnects across all streams
    pub fn reconnects(&self) -> u64 {
        self.monitored.iter().map(|(_, stats)| stats.reconnects).sum()
    }
}

/// Runs a fixed set of stream supervisors plus the reporter
pub struct Orchestrator<F: SourceFactory> {
    config: MonitorConfig,
    factory: F,
    registry: Arc<StatusRegistry>,
    output: Box<dyn Write + Send>,
}

impl<F: SourceFactory> Orchestrator<F> {
    /// Create an orchestrator reporting to stdout
    pub fn new(config: MonitorConfig, factory: F) -> Self {
        Self {
            config,
            factory,
            registry: Arc::new(StatusRegistry::new()),
            output: Box::new(io::stdout()),
        }
    }

    /// Send status lines to `output` instead of stdout
    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Shared status registry
    pub fn registry(&self) -> &Arc<StatusRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Monitor until the configured run duration elapses
    pub async fn run(self, streams: &[StreamSpec]) -> Result<RunSummary> {
        self.run_until(streams, std::future::pending()).await
    }

    /// Monitor until the run duration elapses or `shutdown` completes
    ///
    /// Only an invalid configuration fails the run. Streams whose
    /// collaborator cannot be built are logged and skipped.
    pub async fn run_until<S>(self, streams: &[StreamSpec], shutdown: S) -> Result<RunSummary>
    where
        S: Future<Output = ()>,
    {
        self.config.validate()?;

        let root = CancellationToken::new();
        let mut supervisors = Vec::with_capacity(streams.len());
        let mut skipped = Vec::new();

        for spec in streams {
            match StreamSupervisor::create(
                spec,
                &self.factory,
                Arc::clone(&self.registry),
                self.config.supervisor.clone(),
                &root,
            ) {
                Ok(supervisor) => supervisors.push(Arc::new(supervisor)),
                Err(e) => {
                    tracing::error!(
                        stream = %spec.id,
                        location = %spec.location,
                        error = %e,
                        "Failed to create stream source, skipping"
                    );
                    skipped.push(SkippedStream {
                        id: spec.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        for supervisor in &supervisors {
            // Failures are logged by the supervisor and retried on reconnect
            let _ = supervisor.start();
        }

        let mut tasks = JoinSet::new();
        for supervisor in &supervisors {
            let supervisor = Arc::clone(supervisor);
            tasks.spawn(async move { supervisor.run_loop().await });
        }

        let reporter_cancel = CancellationToken::new();
        let reporter = Reporter::new(
            Arc::clone(&self.registry),
            self.config.reporter.clone(),
            self.output,
        );
        let reporter_task = tokio::spawn(reporter.run_loop(reporter_cancel.clone()));

        tracing::info!(
            streams = supervisors.len(),
            skipped = skipped.len(),
            interval_secs = self.config.supervisor.sample_interval.as_secs(),
            "Monitoring started"
        );

        match self.config.run_duration {
            Some(duration) => {
                tokio::select! {
                    _ = tokio::time::sleep(duration) => {
                        tracing::info!(duration_secs = duration.as_secs(), "Run duration elapsed");
                    }
                    _ = shutdown => tracing::info!("Shutdown requested"),
                }
            }
            None => {
                shutdown.await;
                tracing::info!("Shutdown requested");
            }
        }

        for supervisor in &supervisors {
            supervisor.stop();
        }
        root.cancel();

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Supervisor task failed");
            }
        }

        reporter_cancel.cancel();
        match reporter_task.await {
            Ok(mut out) => {
                if let Err(e) = out.flush() {
                    tracing::warn!(error = %e, "Failed to flush status output");
                }
            }
            Err(e) => tracing::error!(error = %e, "Reporter task failed"),
        }

        let monitored: Vec<(StreamId, StreamStats)> = supervisors
            .iter()
            .map(|supervisor| {
                let stats = supervisor.stats();
                tracing::info!(
                    stream = %supervisor.id(),
                    windows = stats.windows,
                    frames = stats.frames,
                    mean_frames_per_window = stats.mean_frames_per_window(),
                    reconnects = stats.reconnects,
                    start_failures = stats.start_failures,
                    delivery_errors = stats.delivery_errors,
                    availability_pct = stats.availability() * 100.0,
                    "Stream summary"
                );
                (supervisor.id().clone(), stats)
            })
            .collect();

        Ok(RunSummary { monitored, skipped })
    }
}
