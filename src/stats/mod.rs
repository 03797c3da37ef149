//! Statistics and metrics for supervised streams

pub mod metrics;

pub use metrics::StreamStats;
