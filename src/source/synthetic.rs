//! Synthetic test-pattern source
//!
//! A collaborator that fabricates frame units at a fixed rate instead of
//! decoding a network stream. Locations look like:
//!
//! ```text
//! synthetic://h264/25                  25 fps forever
//! synthetic://jpeg/10?stall_after=8    10 fps, goes silent 8s after each start
//! ```
//!
//! The stall option keeps the task alive but quiet, which is what a frozen
//! camera looks like from the outside, so the reconnect policy can be
//! watched end to end.

use std::time::Duration;

use bytes::Bytes;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use url::Url;

use super::codec::Codec;
use super::error::SourceError;
use super::frame::FrameUnit;
use super::sink::FrameSink;
use super::MediaSource;

/// URI scheme handled by [`SyntheticSource`]
pub const SCHEME: &str = "synthetic";

/// Highest rate with a non-zero tick period (one frame per nanosecond)
pub const MAX_FPS: u32 = 1_000_000_000;

/// Annex-B start code, enough to look like a depayloaded unit
const TEST_PATTERN: &[u8] = &[0x00, 0x00, 0x00, 0x01, 0x65];

/// Parsed synthetic location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticParams {
    /// Codec tag stamped on every unit
    pub codec: Codec,
    /// Frames delivered per second (0 = never delivers)
    pub fps: u32,
    /// Stop delivering this long after each start
    pub stall_after: Option<Duration>,
}

impl SyntheticParams {
    /// Parse a `synthetic://<codec>/<fps>[?stall_after=<secs>]` location
    pub fn parse(location: &str) -> Result<Self, SourceError> {
        let url = Url::parse(location)
            .map_err(|e| SourceError::invalid_location(location, e.to_string()))?;

        if url.scheme() != SCHEME {
            return Err(SourceError::UnsupportedScheme(url.scheme().to_string()));
        }

        let codec = url
            .host_str()
            .ok_or_else(|| SourceError::invalid_location(location, "missing codec"))?
            .parse::<Codec>()?;

        let fps = url
            .path()
            .trim_matches('/')
            .parse::<u32>()
            .map_err(|_| SourceError::invalid_location(location, "frame rate must be an integer"))?;
        if fps > MAX_FPS {
            return Err(SourceError::invalid_location(
                location,
                format!("frame rate must not exceed {}", MAX_FPS),
            ));
        }

        let mut stall_after = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "stall_after" => {
                    let secs = value.parse::<u64>().map_err(|_| {
                        SourceError::invalid_location(location, "stall_after must be whole seconds")
                    })?;
                    stall_after = Some(Duration::from_secs(secs));
                }
                other => {
                    return Err(SourceError::invalid_location(
                        location,
                        format!("unknown option '{}'", other),
                    ));
                }
            }
        }

        Ok(Self {
            codec,
            fps,
            stall_after,
        })
    }
}

/// Collaborator that emits fabricated frames on a tokio task
pub struct SyntheticSource {
    params: SyntheticParams,
    sink: FrameSink,
    task: Option<JoinHandle<()>>,
}

impl SyntheticSource {
    /// Create a stopped source
    pub fn new(params: SyntheticParams, sink: FrameSink) -> Self {
        Self {
            params,
            sink,
            task: None,
        }
    }

    /// Build from a location string
    pub fn from_location(location: &str, sink: FrameSink) -> Result<Self, SourceError> {
        Ok(Self::new(SyntheticParams::parse(location)?, sink))
    }

    /// Check if the delivery task is alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl MediaSource for SyntheticSource {
    fn start(&mut self) -> Result<(), SourceError> {
        if self.is_running() {
            return Ok(());
        }

        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| SourceError::StartFailed(e.to_string()))?;

        let SyntheticParams {
            codec,
            fps,
            stall_after,
        } = self.params.clone();
        let sink = self.sink.clone();

        self.task = Some(handle.spawn(async move {
            if fps == 0 {
                return;
            }

            let started_at = Instant::now();
            let mut ticker = tokio::time::interval(Duration::from_secs(1) / fps);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let payload = Bytes::from_static(TEST_PATTERN);
            let mut sequence = 0u64;

            loop {
                ticker.tick().await;

                if stall_after.is_some_and(|limit| started_at.elapsed() >= limit) {
                    tracing::debug!(stream = %sink.stream(), "Synthetic source stalled");
                    std::future::pending::<()>().await;
                }

                sink.deliver(Ok(FrameUnit::new(codec, sequence, payload.clone())));
                sequence += 1;
            }
        }));

        Ok(())
    }

    fn stop(&mut self) -> Result<(), SourceError> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }
}

impl Drop for SyntheticSource {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
