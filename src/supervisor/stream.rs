//! Stream supervisor
//!
//! Owns one stream end to end: starts its collaborator, samples the frame
//! counter once per window, publishes the rate, and restarts the
//! collaborator after a sustained stall.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::orchestrator::StreamSpec;
use crate::registry::{StatusRegistry, StreamId};
use crate::source::{FrameSink, MediaSource, SourceError, SourceFactory};
use crate::stats::StreamStats;

use super::config::SupervisorConfig;
use super::counter::FrameCounter;
use super::state::{LifecycleState, StreamState, WindowAction, WindowOutcome};

/// Supervisor for a single stream
///
/// Lock order is collaborator before state. Neither lock is held across an
/// await point, and the state lock is never held while calling into the
/// collaborator.
pub struct StreamSupervisor {
    id: StreamId,
    location: String,
    config: SupervisorConfig,
    counter: Arc<FrameCounter>,
    source: Mutex<Box<dyn MediaSource>>,
    state: Mutex<StreamState>,
    registry: Arc<StatusRegistry>,
    cancel: CancellationToken,
    stop_requested: AtomicBool,
}

impl StreamSupervisor {
    /// Build the collaborator for `spec` and wrap it in a supervisor
    ///
    /// The supervisor's stop signal is a child of `shutdown`. Fails only if
    /// the factory cannot construct the collaborator.
    pub fn create<F>(
        spec: &StreamSpec,
        factory: &F,
        registry: Arc<StatusRegistry>,
        config: SupervisorConfig,
        shutdown: &CancellationToken,
    ) -> std::result::Result<Self, SourceError>
    where
        F: SourceFactory + ?Sized,
    {
        let counter = Arc::new(FrameCounter::new());
        let sink = FrameSink::new(spec.id.clone(), Arc::clone(&counter));
        let source = factory.create(spec, sink)?;

        Ok(Self {
            id: spec.id.clone(),
            location: spec.location.clone(),
            config,
            counter,
            source: Mutex::new(source),
            state: Mutex::new(StreamState::new()),
            registry,
            cancel: shutdown.child_token(),
            stop_requested: AtomicBool::new(false),
        })
    }

    pub fn id(&self) -> &StreamId {
        &self.id
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> LifecycleState {
        self.state.lock().lifecycle()
    }

    /// Consecutive zero-fps windows so far
    pub fn downtime_windows(&self) -> u32 {
        self.state.lock().downtime_windows()
    }

    /// Last published fps
    pub fn last_fps(&self) -> u64 {
        self.state.lock().last_fps()
    }

    /// Check if `stop()` has been called
    pub fn is_stopped(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    /// Snapshot of the run-long counters
    pub fn stats(&self) -> StreamStats {
        let mut stats = self.state.lock().stats.clone();
        stats.delivery_errors = self.counter.errors();
        stats
    }

    /// Start the collaborator
    ///
    /// The stream enters `Playing` even if the collaborator fails to start,
    /// so the stall policy retries it. Returns the collaborator error in that
    /// case (already logged), or [`Error::SupervisorStopped`] after `stop()`.
    pub fn start(&self) -> Result<()> {
        if !self.state.lock().begin_start() {
            return Err(Error::SupervisorStopped(self.id.clone()));
        }

        tracing::info!(stream = %self.id, location = %self.location, "Starting stream");

        let result = {
            let mut source = self.source.lock();
            if self.is_stopped() {
                return Err(Error::SupervisorStopped(self.id.clone()));
            }
            source.start()
        };

        let mut state = self.state.lock();
        state.mark_playing();

        match result {
            Ok(()) => {
                tracing::info!(stream = %self.id, "Stream started");
                Ok(())
            }
            Err(e) => {
                state.stats.start_failures += 1;
                tracing::error!(
                    stream = %self.id,
                    location = %self.location,
                    error = %e,
                    "Failed to start stream, will retry on reconnect"
                );
                Err(e.into())
            }
        }
    }

    /// Sample one window and apply the stall policy
    ///
    /// Drains the frame counter, publishes the fps to the registry, then
    /// either clears the downtime, counts another stalled window, or
    /// restarts the collaborator once the threshold is reached.
    pub fn sample_window(&self) -> WindowOutcome {
        let frames = self.counter.sample_and_reset();
        let outcome = self.state.lock().record_window(
            frames,
            self.config.sample_interval,
            self.config.reconnect_threshold,
        );

        self.registry.set(&self.id, outcome.fps);

        match outcome.action {
            WindowAction::Healthy => {
                tracing::debug!(stream = %self.id, fps = outcome.fps, frames, "Window sampled");
            }
            WindowAction::Stalled { downtime_windows } => {
                tracing::warn!(
                    stream = %self.id,
                    downtime_windows,
                    threshold = self.config.reconnect_threshold,
                    "No frames in window"
                );
            }
            WindowAction::Reconnect => self.reconnect(),
        }

        outcome
    }

    /// Stop and restart the collaborator
    fn reconnect(&self) {
        tracing::info!(
            stream = %self.id,
            windows = self.config.reconnect_threshold,
            "Stream stalled, reconnecting"
        );

        let (stopped, started) = {
            let mut source = self.source.lock();
            if self.is_stopped() {
                return;
            }
            (source.stop(), source.start())
        };

        let mut state = self.state.lock();
        state.stats.reconnects += 1;

        if let Err(e) = stopped {
            state.stats.stop_failures += 1;
            tracing::warn!(stream = %self.id, error = %e, "Failed to stop stream before restart");
        }

        match started {
            Ok(()) => tracing::info!(stream = %self.id, "Stream restarted"),
            Err(e) => {
                state.stats.start_failures += 1;
                tracing::error!(
                    stream = %self.id,
                    error = %e,
                    "Failed to restart stream, will retry after next stall"
                );
            }
        }

        state.mark_playing();
    }

    /// Sample every `sample_interval` until stopped
    ///
    /// The first sample is taken one full interval after the call. A stop
    /// request interrupts the wait; a window already being processed
    /// completes first.
    pub async fn run_loop(&self) {
        let period = self.config.sample_interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(stream = %self.id, interval_ms = period.as_millis() as u64, "Sampling loop started");

        while !self.cancel.is_cancelled() {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.sample_window();
                }
            }
        }

        tracing::debug!(stream = %self.id, "Sampling loop exited");
    }

    /// Stop monitoring and halt the collaborator
    ///
    /// Idempotent. Any in-flight reconnect finishes before the collaborator
    /// is stopped, and no reconnect starts afterwards.
    pub fn stop(&self) {
        if self.stop_requested.swap(true, Ordering::SeqCst) {
            return;
        }

        self.cancel.cancel();
        let result = self.source.lock().stop();

        let mut state = self.state.lock();
        if let Err(e) = result {
            state.stats.stop_failures += 1;
            tracing::error!(stream = %self.id, error = %e, "Failed to stop stream");
        }
        state.terminate();

        tracing::info!(stream = %self.id, "Stream stopped");
    }
}

impl std::fmt::Debug for StreamSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSupervisor")
            .field("id", &self.id)
            .field("location", &self.location)
            .field("lifecycle", &self.lifecycle())
            .finish_non_exhaustive()
    }
}
