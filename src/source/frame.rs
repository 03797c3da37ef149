//! Delivered frame units

use bytes::Bytes;

use super::codec::Codec;

/// One complete frame unit handed over by a collaborator
///
/// The payload is reference counted and never inspected by the supervisor;
/// only the fact that a unit arrived is counted.
#[derive(Debug, Clone)]
pub struct FrameUnit {
    /// Codec the payload is encoded with
    pub codec: Codec,
    /// Per-start sequence number
    pub sequence: u64,
    /// Depayloaded frame data
    pub data: Bytes,
}

impl FrameUnit {
    /// Create a frame unit
    pub fn new(codec: Codec, sequence: u64, data: Bytes) -> Self {
        Self {
            codec,
            sequence,
            data,
        }
    }
}
