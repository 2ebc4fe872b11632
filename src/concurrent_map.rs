//! Sharded relevance accumulator for the parallel ranking path.
//!
//! Document ids are spread across independently locked shards, so worker
//! threads accumulating contributions for distinct documents rarely
//! serialize. A single id's final value reflects the serial order induced
//! by its shard's mutex.

use crate::document::DocumentId;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};

/// A sharded mutable map of document id to relevance.
#[derive(Debug)]
pub struct ConcurrentMap {
    shards: Vec<Mutex<HashMap<DocumentId, f64>>>,
}

impl ConcurrentMap {
    /// Creates a map with `shard_count` shards.
    ///
    /// `shard_count` should be at least the number of worker threads;
    /// a zero count is bumped to one.
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| Mutex::default()).collect(),
        }
    }

    fn shard(&self, id: DocumentId) -> &Mutex<HashMap<DocumentId, f64>> {
        &self.shards[id as usize % self.shards.len()]
    }

    /// Adds `delta` to the entry for `id`, creating it at 0.0 if absent.
    /// Locks only the shard `id` maps to.
    pub fn add(&self, id: DocumentId, delta: f64) {
        *self.shard(id).lock().entry(id).or_insert(0.0) += delta;
    }

    /// Removes the entry for `id` if present. Locks only that id's shard.
    pub fn erase(&self, id: DocumentId) {
        self.shard(id).lock().remove(&id);
    }

    /// Merges all shards into an ordered map.
    ///
    /// Consumes the map, so no locks are taken; callers must have joined
    /// their workers first.
    pub fn into_ordinary_map(self) -> BTreeMap<DocumentId, f64> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let map = ConcurrentMap::new(4);
        map.add(7, 0.5);
        map.add(7, 0.25);
        map.add(11, 1.0);
        let merged = map.into_ordinary_map();
        assert_eq!(merged[&7], 0.75);
        assert_eq!(merged[&11], 1.0);
    }

    #[test]
    fn test_erase_removes_entry() {
        let map = ConcurrentMap::new(4);
        map.add(7, 0.5);
        map.add(8, 0.5);
        map.erase(7);
        map.erase(99);
        let merged = map.into_ordinary_map();
        assert!(!merged.contains_key(&7));
        assert_eq!(merged[&8], 0.5);
    }

    #[test]
    fn test_merged_map_is_ordered() {
        let map = ConcurrentMap::new(3);
        for id in [5u32, 1, 9, 2, 40] {
            map.add(id, 1.0);
        }
        let ids: Vec<DocumentId> = map.into_ordinary_map().into_keys().collect();
        assert_eq!(ids, vec![1, 2, 5, 9, 40]);
    }

    #[test]
    fn test_zero_shard_count_is_bumped() {
        let map = ConcurrentMap::new(0);
        map.add(3, 1.0);
        assert_eq!(map.into_ordinary_map()[&3], 1.0);
    }

    #[test]
    fn test_concurrent_adds_from_many_threads() {
        let map = ConcurrentMap::new(8);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for id in 0..100u32 {
                        map.add(id, 1.0);
                    }
                });
            }
        });
        let merged = map.into_ordinary_map();
        assert_eq!(merged.len(), 100);
        for id in 0..100u32 {
            assert_eq!(merged[&id], 4.0);
        }
    }
}
