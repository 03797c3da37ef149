//! Per-stream frame counter
//!
//! Shared between exactly two parties: the collaborator's delivery callback,
//! which increments it, and the owning supervisor, which drains it once per
//! sampling window. Both go through the same lock, so every frame lands in
//! exactly one window.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Frames delivered since the last sample
#[derive(Debug, Default)]
pub struct FrameCounter {
    frames: Mutex<u64>,
    errors: AtomicU64,
}

impl FrameCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one delivered frame
    pub fn record_frame(&self) {
        let mut frames = self.frames.lock();
        *frames = frames.saturating_add(1);
    }

    /// Read the count and reset it to zero in one step
    pub fn sample_and_reset(&self) -> u64 {
        std::mem::take(&mut *self.frames.lock())
    }

    /// Count one failed delivery
    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Total failed deliveries since creation
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
}
