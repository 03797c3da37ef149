//! Stream state machine
//!
//! Tracks one stream's lifecycle and applies the stall policy to each
//! sampling window.
//!
//! ```text
//!   Stopped ──start──► Starting ──► Playing ◄──────────────┐
//!                                    │  ▲                   │
//!                         fps == 0   │  │ fps > 0           │ restart issued
//!                                    ▼  │                   │
//!                                  Degraded ──threshold──► Reconnecting
//!
//!   any state ──stop──► Stopped (terminal)
//! ```

use std::fmt;
use std::time::Duration;

use crate::stats::StreamStats;

/// Stream lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Collaborator start in progress
    Starting,
    /// Frames expected
    Playing,
    /// Last window saw no frames, below the reconnect threshold
    Degraded,
    /// Restart issued after sustained stall
    Reconnecting,
    /// Not started yet, or stopped for good
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Playing => "playing",
            LifecycleState::Degraded => "degraded",
            LifecycleState::Reconnecting => "reconnecting",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// What the stall policy decided for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Frames arrived, downtime cleared
    Healthy,
    /// No frames, still counting towards the threshold
    Stalled { downtime_windows: u32 },
    /// Threshold reached, the collaborator must be restarted
    Reconnect,
}

/// Result of sampling one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOutcome {
    /// Frames per second over the window (integer division)
    pub fps: u64,
    /// Policy decision
    pub action: WindowAction,
}

/// Integer frame rate over a window
///
/// Equal to `frames / interval_secs` for whole-second windows.
pub fn fps_for(frames: u64, interval: Duration) -> u64 {
    let millis = interval.as_millis().max(1);
    (u128::from(frames) * 1000 / millis) as u64
}

/// Mutable per-stream state owned by its supervisor
#[derive(Debug)]
pub struct StreamState {
    /// Current lifecycle state
    lifecycle: LifecycleState,

    /// Consecutive windows with fps == 0
    downtime_windows: u32,

    /// Last published fps
    last_fps: u64,

    /// Set once stopped; no transitions afterwards
    terminated: bool,

    /// Run-long counters
    pub stats: StreamStats,
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamState {
    /// Create a state for a stream that has not been started
    pub fn new() -> Self {
        Self {
            lifecycle: LifecycleState::Stopped,
            downtime_windows: 0,
            last_fps: 0,
            terminated: false,
            stats: StreamStats::new(),
        }
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn downtime_windows(&self) -> u32 {
        self.downtime_windows
    }

    pub fn last_fps(&self) -> u64 {
        self.last_fps
    }

    /// Check if the stream was stopped for good
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// `Stopped` is left only through `begin_start`
    fn transition(&mut self, next: LifecycleState) {
        if !self.terminated && self.lifecycle != LifecycleState::Stopped {
            self.lifecycle = next;
        }
    }

    /// Enter `Starting`; returns false if the stream was already stopped
    pub fn begin_start(&mut self) -> bool {
        if self.terminated {
            return false;
        }
        self.lifecycle = LifecycleState::Starting;
        true
    }

    /// Enter `Playing` after a start or restart attempt
    ///
    /// Applied whether or not the attempt succeeded: a failed start simply
    /// produces zero-fps windows and is retried by the stall policy.
    pub fn mark_playing(&mut self) {
        self.transition(LifecycleState::Playing);
    }

    /// Enter `Stopped` permanently
    pub fn terminate(&mut self) {
        self.lifecycle = LifecycleState::Stopped;
        self.terminated = true;
    }

    /// Apply the stall policy to one sampling window
    ///
    /// Windows are counted in every state, but a stream that was never
    /// started stays `Stopped`.
    pub fn record_window(
        &mut self,
        frames: u64,
        interval: Duration,
        reconnect_threshold: u32,
    ) -> WindowOutcome {
        let fps = fps_for(frames, interval);

        self.last_fps = fps;
        self.stats.windows += 1;
        self.stats.frames += frames;
        self.stats.last_fps = fps;

        if fps > 0 {
            self.downtime_windows = 0;
            self.transition(LifecycleState::Playing);
            return WindowOutcome {
                fps,
                action: WindowAction::Healthy,
            };
        }

        self.stats.zero_windows += 1;
        self.downtime_windows += 1;

        if self.downtime_windows >= reconnect_threshold {
            // Cleared before the restart is attempted, whatever its result
            self.downtime_windows = 0;
            self.transition(LifecycleState::Reconnecting);
            WindowOutcome {
                fps,
                action: WindowAction::Reconnect,
            }
        } else {
            self.transition(LifecycleState::Degraded);
            WindowOutcome {
                fps,
                action: WindowAction::Stalled {
                    downtime_windows: self.downtime_windows,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_fps_integer_division() {
        assert_eq!(fps_for(10, SECOND), 10);
        assert_eq!(fps_for(0, SECOND), 0);
        assert_eq!(fps_for(5, Duration::from_secs(2)), 2);
        assert_eq!(fps_for(1, Duration::from_secs(2)), 0);
        assert_eq!(fps_for(59, Duration::from_secs(3)), 19);
        assert_eq!(fps_for(5, Duration::from_millis(500)), 10);
    }

    #[test]
    fn test_lifecycle() {
        let mut state = StreamState::new();
        assert_eq!(state.lifecycle(), LifecycleState::Stopped);

        assert!(state.begin_start());
        assert_eq!(state.lifecycle(), LifecycleState::Starting);

        state.mark_playing();
        assert_eq!(state.lifecycle(), LifecycleState::Playing);

        state.terminate();
        assert_eq!(state.lifecycle(), LifecycleState::Stopped);
        assert!(state.is_terminated());
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut state = StreamState::new();
        state.begin_start();
        state.terminate();

        assert!(!state.begin_start());
        state.mark_playing();
        state.record_window(0, SECOND, 5);
        state.record_window(30, SECOND, 5);

        assert_eq!(state.lifecycle(), LifecycleState::Stopped);
    }

    #[test]
    fn test_healthy_window() {
        let mut state = StreamState::new();
        state.begin_start();
        state.mark_playing();

        let outcome = state.record_window(10, SECOND, 5);
        assert_eq!(outcome.fps, 10);
        assert_eq!(outcome.action, WindowAction::Healthy);
        assert_eq!(state.downtime_windows(), 0);
        assert_eq!(state.last_fps(), 10);
    }

    #[test]
    fn test_downtime_grows_then_reconnects_at_threshold() {
        let mut state = StreamState::new();
        state.begin_start();
        state.mark_playing();

        for expected in 1..=4 {
            let outcome = state.record_window(0, SECOND, 5);
            assert_eq!(
                outcome.action,
                WindowAction::Stalled {
                    downtime_windows: expected
                }
            );
            assert_eq!(state.downtime_windows(), expected);
            assert_eq!(state.lifecycle(), LifecycleState::Degraded);
        }

        let outcome = state.record_window(0, SECOND, 5);
        assert_eq!(outcome.action, WindowAction::Reconnect);
        assert_eq!(state.downtime_windows(), 0);
        assert_eq!(state.lifecycle(), LifecycleState::Reconnecting);
    }

    #[test]
    fn test_frames_reset_downtime() {
        let mut state = StreamState::new();
        state.begin_start();
        state.mark_playing();

        for _ in 0..4 {
            state.record_window(0, SECOND, 5);
        }
        assert_eq!(state.downtime_windows(), 4);

        let outcome = state.record_window(3, SECOND, 5);
        assert_eq!(outcome.fps, 3);
        assert_eq!(outcome.action, WindowAction::Healthy);
        assert_eq!(state.downtime_windows(), 0);
        assert_eq!(state.lifecycle(), LifecycleState::Playing);
    }

    #[test]
    fn test_sub_unit_rate_counts_as_stall() {
        let mut state = StreamState::new();

        // One frame over two seconds rounds down to 0 fps
        let outcome = state.record_window(1, Duration::from_secs(2), 5);
        assert_eq!(outcome.fps, 0);
        assert_eq!(state.downtime_windows(), 1);
    }

    #[test]
    fn test_unstarted_stream_stays_stopped() {
        let mut state = StreamState::new();

        state.mark_playing();
        assert_eq!(state.lifecycle(), LifecycleState::Stopped);

        state.record_window(0, SECOND, 5);
        state.record_window(30, SECOND, 5);
        assert_eq!(state.lifecycle(), LifecycleState::Stopped);
        assert_eq!(state.stats.windows, 2);
        assert!(!state.is_terminated());

        assert!(state.begin_start());
        assert_eq!(state.lifecycle(), LifecycleState::Starting);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut state = StreamState::new();
        state.record_window(20, SECOND, 2);
        state.record_window(0, SECOND, 2);
        state.record_window(0, SECOND, 2);

        assert_eq!(state.stats.windows, 3);
        assert_eq!(state.stats.frames, 20);
        assert_eq!(state.stats.zero_windows, 2);
        assert_eq!(state.stats.last_fps, 0);
    }
}
