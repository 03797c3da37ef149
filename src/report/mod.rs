//! FPS status reporting
//!
//! The reporter periodically copies the status registry and renders one
//! line per interval:
//!
//! ```text
//! [2024-05-01 12:00:05] cam0: 25 FPS, cam1: 0 FPS, cam2: 14 FPS
//! ```
//!
//! Streams appear in ascending identifier order. Entries below the display
//! floor are highlighted; a stream stuck at 0 FPS is how an unhealthy
//! camera shows up to an operator.

pub mod config;
pub mod render;
pub mod reporter;

pub use config::{ReporterConfig, DEFAULT_DEGRADED_BELOW};
pub use render::render_line;
pub use reporter::Reporter;
