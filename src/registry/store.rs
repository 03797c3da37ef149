//! Status registry implementation
//!
//! The process-wide table of the latest FPS sample per stream. Every
//! supervisor writes its own key; the reporter reads consistent copies.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::id::StreamId;

/// Latest FPS sample for every stream that has produced one
///
/// All access goes through a single mutex. Writes are O(log n) upserts and
/// reads copy the table out, so the lock is only ever held for a bounded
/// amount of work and never across an await point.
#[derive(Debug, Default)]
pub struct StatusRegistry {
    entries: Mutex<BTreeMap<StreamId, u64>>,
}

impl StatusRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the latest sample for a stream, replacing any previous one
    pub fn set(&self, id: &StreamId, fps: u64) {
        let mut entries = self.entries.lock();
        match entries.get_mut(id) {
            Some(slot) => *slot = fps,
            None => {
                entries.insert(id.clone(), fps);
            }
        }
    }

    /// Get the latest sample for a stream
    pub fn get(&self, id: &str) -> Option<u64> {
        self.entries.lock().get(id).copied()
    }

    /// Number of streams with at least one sample
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if no stream has published yet
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy the full table, ordered by stream identifier
    pub fn snapshot(&self) -> StatusSnapshot {
        let entries = self.entries.lock();
        StatusSnapshot {
            entries: entries.iter().map(|(id, fps)| (id.clone(), *fps)).collect(),
        }
    }
}

/// Point-in-time copy of the registry, sorted ascending by identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: Vec<(StreamId, u64)>,
}

impl StatusSnapshot {
    /// Iterate over `(id, fps)` pairs in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&StreamId, u64)> {
        self.entries.iter().map(|(id, fps)| (id, *fps))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_set_and_get() {
        let registry = StatusRegistry::new();
        let id = StreamId::from("cam0");

        assert!(registry.is_empty());
        assert_eq!(registry.get("cam0"), None);

        registry.set(&id, 25);
        assert_eq!(registry.get("cam0"), Some(25));

        // Upsert keeps a single entry
        registry.set(&id, 0);
        assert_eq!(registry.get("cam0"), Some(0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_sorted_by_id() {
        let registry = StatusRegistry::new();
        registry.set(&StreamId::from("camC"), 3);
        registry.set(&StreamId::from("camA"), 30);
        registry.set(&StreamId::from("camB"), 12);

        let snapshot = registry.snapshot();
        let ids: Vec<&str> = snapshot.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["camA", "camB", "camC"]);

        let fps: Vec<u64> = snapshot.iter().map(|(_, fps)| fps).collect();
        assert_eq!(fps, [30, 12, 3]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let registry = StatusRegistry::new();
        registry.set(&StreamId::from("cam0"), 10);

        let snapshot = registry.snapshot();
        registry.set(&StreamId::from("cam0"), 20);
        registry.set(&StreamId::from("cam1"), 5);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.iter().next().map(|(_, fps)| fps), Some(10));
    }

    #[test]
    fn test_concurrent_writers_keep_latest_value() {
        let registry = Arc::new(StatusRegistry::new());
        let streams = 8;
        let windows = 200u64;

        let handles: Vec<_> = (0..streams)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let id = StreamId::indexed(i);
                    for fps in 1..=windows {
                        registry.set(&id, fps);
                        // Readers interleave with writers
                        let _ = registry.snapshot();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), streams);
        assert!(snapshot.iter().all(|(_, fps)| fps == windows));
    }
}
