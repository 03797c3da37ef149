//! Decoding collaborator interface
//!
//! The supervisor never touches transport, depayloading or codecs. It sees a
//! stream's decoding pipeline only through [`MediaSource`] (start and stop)
//! and the [`FrameSink`] callback the pipeline invokes once per complete
//! frame unit.
//!
//! ```text
//!   SourceFactory::create(spec, sink)
//!           │
//!           ▼
//!   Box<dyn MediaSource> ── frames ──► FrameSink ──► FrameCounter
//!           ▲                                            │
//!           └────────── start / stop ──── StreamSupervisor ◄┘ sample_and_reset
//! ```

pub mod codec;
pub mod error;
pub mod frame;
pub mod sink;
pub mod synthetic;

#[cfg(test)]
pub(crate) mod mock;

pub use codec::Codec;
pub use error::SourceError;
pub use frame::FrameUnit;
pub use sink::FrameSink;
pub use synthetic::{SyntheticParams, SyntheticSource};

use std::sync::Arc;

use url::Url;

use crate::orchestrator::StreamSpec;

/// A stream's decoding pipeline, as seen by its supervisor
///
/// State changes are synchronous. Implementations deliver frames from their
/// own activity through the [`FrameSink`] they were built with.
pub trait MediaSource: Send {
    /// Begin delivering frames
    fn start(&mut self) -> Result<(), SourceError>;

    /// Halt delivery; stopping a stopped source is a no-op
    fn stop(&mut self) -> Result<(), SourceError>;
}

/// Builds the collaborator for a configured stream
pub trait SourceFactory: Send + Sync {
    /// Construct a stopped source that reports frames to `sink`
    fn create(&self, spec: &StreamSpec, sink: FrameSink)
        -> Result<Box<dyn MediaSource>, SourceError>;
}

/// Factory dispatching on the location's URI scheme
///
/// Only `synthetic://` locations have a built-in pipeline. Other schemes are
/// reported as construction failures so the stream is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSourceFactory;

impl SourceFactory for DefaultSourceFactory {
    fn create(
        &self,
        spec: &StreamSpec,
        sink: FrameSink,
    ) -> Result<Box<dyn MediaSource>, SourceError> {
        let url = Url::parse(&spec.location)
            .map_err(|e| SourceError::invalid_location(&spec.location, e.to_string()))?;

        match url.scheme() {
            synthetic::SCHEME => Ok(Box::new(SyntheticSource::from_location(
                &spec.location,
                sink,
            )?)),
            other => Err(SourceError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl<F: SourceFactory + ?Sized> SourceFactory for Arc<F> {
    fn create(
        &self,
        spec: &StreamSpec,
        sink: FrameSink,
    ) -> Result<Box<dyn MediaSource>, SourceError> {
        (**self).create(spec, sink)
    }
}
