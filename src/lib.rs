//! # streamwatch
//!
//! Frame-rate supervision for many independent, long-lived media streams.
//!
//! Each stream gets a supervisor that counts delivered frames per sampling
//! window, publishes the resulting FPS to a shared registry, and restarts
//! the stream's decoding pipeline after a run of empty windows. A reporter
//! renders the registry as one status line per interval.
//!
//! The decoding pipeline itself is a collaborator behind
//! [`source::MediaSource`]; the supervisor only starts it, stops it, and
//! receives a callback per frame unit.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use streamwatch::{DefaultSourceFactory, MonitorConfig, Orchestrator, StreamSpec};
//!
//! # async fn example() -> streamwatch::error::Result<()> {
//! let streams = vec![
//!     StreamSpec::new("lobby", "synthetic://h264/25"),
//!     StreamSpec::new("dock", "synthetic://jpeg/10?stall_after=8"),
//! ];
//!
//! let config = MonitorConfig::default()
//!     .interval(Duration::from_secs(1))
//!     .run_duration(Some(Duration::from_secs(30)));
//!
//! let summary = Orchestrator::new(config, DefaultSourceFactory)
//!     .run(&streams)
//!     .await?;
//! println!("reconnects: {}", summary.reconnects());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod report;
pub mod source;
pub mod stats;
pub mod supervisor;

pub use error::{Error, Result};
pub use orchestrator::{MonitorConfig, Orchestrator, RunSummary, StreamSpec};
pub use registry::{StatusRegistry, StreamId};
pub use report::{Reporter, ReporterConfig};
pub use source::{DefaultSourceFactory, MediaSource, SourceError, SourceFactory};
pub use supervisor::{LifecycleState, StreamSupervisor, SupervisorConfig};
