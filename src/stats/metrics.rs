//! Statistics for supervised streams

/// Stream-level statistics, accumulated over the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Sampling windows observed
    pub windows: u64,
    /// Frames counted across all windows
    pub frames: u64,
    /// Windows whose computed fps was zero
    pub zero_windows: u64,
    /// Reconnects issued by the stall policy
    pub reconnects: u64,
    /// Failed collaborator starts (initial or during reconnect)
    pub start_failures: u64,
    /// Failed collaborator stops
    pub stop_failures: u64,
    /// Frame deliveries that reported an error instead of a frame
    pub delivery_errors: u64,
    /// Most recent fps sample
    pub last_fps: u64,
}

impl StreamStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of windows that saw frames, in `[0.0, 1.0]`
    ///
    /// Returns 1.0 before the first window so a fresh stream is not
    /// reported as unavailable.
    pub fn availability(&self) -> f64 {
        if self.windows == 0 {
            return 1.0;
        }
        (self.windows - self.zero_windows) as f64 / self.windows as f64
    }

    /// Mean frames per window
    pub fn mean_frames_per_window(&self) -> f64 {
        if self.windows == 0 {
            0.0
        } else {
            self.frames as f64 / self.windows as f64
        }
    }
}
