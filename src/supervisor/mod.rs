//! Per-stream health supervision
//!
//! Each monitored stream gets one [`StreamSupervisor`] running its own
//! sampling loop. Every window it drains the stream's [`FrameCounter`],
//! computes an integer fps, publishes it to the shared registry and applies
//! the stall policy:
//!
//! - fps > 0 clears the downtime count
//! - fps == 0 increments it
//! - reaching `reconnect_threshold` restarts the collaborator and clears
//!   the count, whether or not the restart succeeds
//!
//! A failed restart is not special-cased: the next windows observe zero fps
//! again and count towards the next attempt.

pub mod config;
pub mod counter;
pub mod state;
pub mod stream;

pub use config::{SupervisorConfig, DEFAULT_RECONNECT_THRESHOLD};
pub use counter::FrameCounter;
pub use state::{fps_for, LifecycleState, StreamState, WindowAction, WindowOutcome};
pub use stream::StreamSupervisor;
