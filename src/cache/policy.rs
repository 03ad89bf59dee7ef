//! Eviction Policy Module
//!
//! Insertion-order eviction strategies that trim the entry sequence back to
//! its byte budget.

use std::collections::VecDeque;
use std::fmt::Debug;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, StorageBackend};

// == Eviction Policy Trait ==
/// Rule selecting which entries to remove when the store is over budget.
///
/// Trimming removes entries one at a time, recomputing the running size after
/// each removal, until the size fits the budget or the sequence is empty.
/// Removed entries are disposed through the backend; disposal failures are
/// logged and absorbed.
pub trait EvictionPolicy: Debug + Send + Sync {
    /// Trims `entries` until the running size is at most `capacity_bytes`,
    /// returning the size after trimming.
    fn trim(
        &self,
        entries: &mut VecDeque<CacheEntry>,
        current_size: usize,
        capacity_bytes: usize,
        backend: &dyn StorageBackend,
    ) -> usize;
}

/// Removes and disposes one entry, returning its size.
fn evict(entry: &mut CacheEntry, backend: &dyn StorageBackend) -> usize {
    let size = entry.size();
    debug!("Evicting entry: key={}, size={}", entry.key(), size);
    if let Err(err) = backend.dispose(entry) {
        warn!("Failed to dispose evicted entry '{}': {}", entry.key(), err);
    }
    size
}

// == FIFO Policy ==
/// First stored, first evicted: removes the oldest entries from the front.
#[derive(Debug, Default)]
pub struct FifoPolicy;

impl EvictionPolicy for FifoPolicy {
    fn trim(
        &self,
        entries: &mut VecDeque<CacheEntry>,
        current_size: usize,
        capacity_bytes: usize,
        backend: &dyn StorageBackend,
    ) -> usize {
        let mut size = current_size;

        while size > capacity_bytes {
            let mut entry = match entries.pop_front() {
                Some(entry) => entry,
                None => break,
            };
            size -= evict(&mut entry, backend);
        }

        size
    }
}

// == LIFO Policy ==
/// Last stored, first evicted: removes the newest entries from the back, so
/// the earliest-inserted entries are preserved longest.
#[derive(Debug, Default)]
pub struct LifoPolicy;

impl EvictionPolicy for LifoPolicy {
    fn trim(
        &self,
        entries: &mut VecDeque<CacheEntry>,
        current_size: usize,
        capacity_bytes: usize,
        backend: &dyn StorageBackend,
    ) -> usize {
        let mut size = current_size;

        while size > capacity_bytes {
            let mut entry = match entries.pop_back() {
                Some(entry) => entry,
                None => break,
            };
            size -= evict(&mut entry, backend);
        }

        size
    }
}
