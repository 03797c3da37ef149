//! Run orchestration
//!
//! Turns a stream list into a running fleet of supervisors and owns the
//! coordinated shutdown.
//!
//! ```text
//!   streams.txt ──► parse_stream_list ──► [StreamSpec]
//!                                            │
//!                                   Orchestrator::run_until
//!                                            │
//!          ┌───────────────┬─────────────────┼──────────────┐
//!          ▼               ▼                 ▼              ▼
//!   Supervisor cam0  Supervisor cam1  Supervisor camN   Reporter
//!    (own task)        (own task)       (own task)     (own task)
//! ```
//!
//! The number of tasks is fixed at start: one per constructed stream plus
//! the reporter. Shutdown stops every supervisor, waits for all of their
//! loops to exit, and only then stops the reporter.

pub mod config;
pub mod runner;
pub mod streams;

pub use config::{MonitorConfig, DEFAULT_RUN_DURATION};
pub use runner::{Orchestrator, RunSummary, SkippedStream};
pub use streams::{load_stream_list, parse_stream_list, StreamSpec};
