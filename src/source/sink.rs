//! Frame delivery callback

use std::sync::Arc;

use crate::registry::StreamId;
use crate::supervisor::FrameCounter;

use super::error::SourceError;
use super::frame::FrameUnit;

/// Callback handle a collaborator uses to report delivered frames
///
/// Cloning is cheap; every clone feeds the same stream's counter. A sink is
/// bound to exactly one stream and is never shared across streams.
#[derive(Debug, Clone)]
pub struct FrameSink {
    stream: StreamId,
    counter: Arc<FrameCounter>,
}

impl FrameSink {
    /// Bind a sink to a stream's counter
    pub fn new(stream: StreamId, counter: Arc<FrameCounter>) -> Self {
        Self { stream, counter }
    }

    /// Stream this sink belongs to
    pub fn stream(&self) -> &StreamId {
        &self.stream
    }

    /// Report one delivery attempt
    ///
    /// A frame increments the counter. An error is logged and counted
    /// separately, leaving the frame count untouched.
    pub fn deliver(&self, frame: Result<FrameUnit, SourceError>) {
        match frame {
            Ok(_) => self.counter.record_frame(),
            Err(e) => {
                self.counter.record_error();
                tracing::warn!(stream = %self.stream, error = %e, "Failed to pull frame");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::source::Codec;

    fn frame(sequence: u64) -> FrameUnit {
        FrameUnit::new(Codec::H264, sequence, Bytes::from_static(&[0, 0, 0, 1]))
    }

    #[test]
    fn test_deliver_counts_frames() {
        let counter = Arc::new(FrameCounter::new());
        let sink = FrameSink::new(StreamId::from("cam0"), Arc::clone(&counter));

        sink.deliver(Ok(frame(0)));
        sink.clone().deliver(Ok(frame(1)));

        assert_eq!(counter.sample_and_reset(), 2);
        assert_eq!(counter.errors(), 0);
    }

    #[test]
    fn test_delivery_error_not_counted_as_frame() {
        let counter = Arc::new(FrameCounter::new());
        let sink = FrameSink::new(StreamId::from("cam0"), Arc::clone(&counter));

        sink.deliver(Ok(frame(0)));
        sink.deliver(Err(SourceError::Delivery("no sample".into())));

        assert_eq!(counter.sample_and_reset(), 1);
        assert_eq!(counter.errors(), 1);
    }
}
