//! Stream status registry
//!
//! The registry aggregates the latest FPS sample of every monitored stream.
//! It is written by every supervisor and read by the reporter.
//!
//! # Architecture
//!
//! ```text
//!   [Supervisor cam0]   [Supervisor cam1]   [Supervisor camN]
//!          │                   │                   │
//!          └──── set(id, fps) ─┼───────────────────┘
//!                              ▼
//!                   Arc<StatusRegistry>
//!              ┌──────────────────────────┐
//!              │ Mutex<BTreeMap<Id, fps>> │
//!              └────────────┬─────────────┘
//!                           │ snapshot()
//!                           ▼
//!                      [Reporter]
//! ```
//!
//! Readers never iterate the live table: `snapshot()` copies it under the
//! lock, so a rendered line always reflects one consistent state.

pub mod id;
pub mod store;

pub use id::StreamId;
pub use store::{StatusRegistry, StatusSnapshot};
