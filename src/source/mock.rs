//! Scriptable collaborator for tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use super::{Codec, FrameSink, FrameUnit, MediaSource, SourceError, SourceFactory};
use crate::orchestrator::StreamSpec;
use crate::registry::StreamId;

/// Shared view of one mock source: call counts and failure switches
#[derive(Debug, Default)]
pub(crate) struct MockControl {
    starts: AtomicU32,
    stops: AtomicU32,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    playing: AtomicBool,
}

impl MockControl {
    pub(crate) fn starts(&self) -> u32 {
        self.starts.load(Ordering::SeqCst)
    }

    pub(crate) fn stops(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_start(&self, fail: bool) {
        self.fail_start.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_stop(&self, fail: bool) {
        self.fail_stop.store(fail, Ordering::SeqCst);
    }
}

pub(crate) struct MockSource {
    control: Arc<MockControl>,
}

impl MediaSource for MockSource {
    fn start(&mut self) -> Result<(), SourceError> {
        self.control.starts.fetch_add(1, Ordering::SeqCst);
        if self.control.fail_start.load(Ordering::SeqCst) {
            return Err(SourceError::StartFailed("state change failure".into()));
        }
        self.control.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SourceError> {
        self.control.stops.fetch_add(1, Ordering::SeqCst);
        self.control.playing.store(false, Ordering::SeqCst);
        if self.control.fail_stop.load(Ordering::SeqCst) {
            return Err(SourceError::StopFailed("state change failure".into()));
        }
        Ok(())
    }
}

/// Factory handing out [`MockSource`]s and keeping their sinks reachable
#[derive(Default)]
pub(crate) struct MockFactory {
    broken: HashSet<String>,
    controls: Mutex<HashMap<StreamId, Arc<MockControl>>>,
    sinks: Mutex<HashMap<StreamId, FrameSink>>,
}

impl MockFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail construction for this stream id
    pub(crate) fn broken(mut self, id: &str) -> Self {
        self.broken.insert(id.to_string());
        self
    }

    pub(crate) fn control(&self, id: &str) -> Arc<MockControl> {
        self.controls
            .lock()
            .get(id)
            .cloned()
            .expect("no source built for stream")
    }

    /// Deliver `count` frames as the collaborator would
    pub(crate) fn deliver(&self, id: &str, count: usize) {
        let sink = self
            .sinks
            .lock()
            .get(id)
            .cloned()
            .expect("no sink registered for stream");
        for sequence in 0..count {
            sink.deliver(Ok(FrameUnit::new(
                Codec::H264,
                sequence as u64,
                Bytes::from_static(&[0, 0, 0, 1]),
            )));
        }
    }
}

impl SourceFactory for MockFactory {
    fn create(
        &self,
        spec: &StreamSpec,
        sink: FrameSink,
    ) -> Result<Box<dyn MediaSource>, SourceError> {
        if self.broken.contains(spec.id.as_str()) {
            return Err(SourceError::Construction("missing element".into()));
        }

        let control = Arc::new(MockControl::default());
        self.controls
            .lock()
            .insert(spec.id.clone(), Arc::clone(&control));
        self.sinks.lock().insert(spec.id.clone(), sink);

        Ok(Box::new(MockSource { control }))
    }
}
