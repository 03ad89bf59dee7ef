//! Cache Store Module
//!
//! Core engine combining the ordered entry sequence with byte-size accounting
//! and policy-driven trimming.

use std::collections::VecDeque;
use std::fmt::Write as _;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, EvictionPolicy, StorageBackend};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded byte-blob key/value store with pluggable eviction and storage.
///
/// Entries are kept in insertion order; overwriting a key replaces its
/// payload without moving it. After every mutation the eviction policy trims
/// the sequence back to the configured byte budget.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries in insertion order
    entries: VecDeque<CacheEntry>,
    /// Running total of all entry sizes in bytes
    current_size: usize,
    /// Maximum total size in bytes
    capacity_bytes: usize,
    /// Eviction strategy, fixed at construction
    policy: Box<dyn EvictionPolicy>,
    /// Payload storage, fixed at construction
    backend: Box<dyn StorageBackend>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given collaborators.
    ///
    /// `capacity_bytes` must be positive; construction through
    /// [`Cache::new`](crate::cache::Cache::new) validates this.
    pub fn new(
        policy: Box<dyn EvictionPolicy>,
        backend: Box<dyn StorageBackend>,
        capacity_bytes: usize,
    ) -> Self {
        Self {
            entries: VecDeque::new(),
            current_size: 0,
            capacity_bytes,
            policy,
            backend,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores `data` under `key`, then trims the store back to its byte budget.
    ///
    /// An existing key has its payload replaced in place and keeps its
    /// position in the eviction order. Failures after validation (backend
    /// writes, disposal during trimming) are absorbed so the store stays
    /// usable in its last consistent state.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `key` or `data` is empty; nothing is
    /// stored in that case.
    pub fn put(&mut self, key: &str, data: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument(
                "Key cannot be empty".to_string(),
            ));
        }
        if data.is_empty() {
            return Err(CacheError::InvalidArgument(
                "Payload cannot be empty".to_string(),
            ));
        }

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key() == key) {
            // Overwrite: swap the payload and re-account the size difference.
            // The size is re-read from the entry even on failure so the
            // accounting matches whatever the backend left behind.
            let old_size = entry.size();
            let result = self.backend.update(entry, data);
            self.current_size = self.current_size - old_size + entry.size();

            match result {
                Ok(()) => {
                    self.stats.record_update();
                    debug!("Updated entry: key={}, size={}", key, data.len());
                }
                Err(err) => warn!("Failed to update entry '{}': {}", key, err),
            }
        } else {
            match self.backend.store(key, data) {
                Ok(entry) => {
                    self.current_size += entry.size();
                    self.entries.push_back(entry);
                    self.stats.record_insertion();
                    debug!("Inserted entry: key={}, size={}", key, data.len());
                }
                Err(err) => {
                    warn!("Failed to store entry '{}': {}", key, err);
                    return Ok(());
                }
            }
        }

        self.trim_to_capacity();
        Ok(())
    }

    // == Get ==
    /// Retrieves the payload stored under `key`.
    ///
    /// Returns `None` for a missing key, and also when the backend fails to
    /// produce the recorded bytes. Lookups never affect eviction order.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        let entry = match self.entries.iter().find(|entry| entry.key() == key) {
            Some(entry) => entry,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        match self.backend.read(entry) {
            Ok(data) => {
                self.stats.record_hit();
                Some(data)
            }
            Err(err) => {
                warn!("Failed to read entry '{}': {}", key, err);
                self.stats.record_miss();
                None
            }
        }
    }

    // == Size ==
    /// Returns the total size of the stored payloads in bytes. O(1).
    pub fn size(&self) -> usize {
        self.current_size
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Returns the configured maximum size in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity_bytes
    }

    // == Set Capacity ==
    /// Reconfigures the byte budget from a kilobyte count and trims
    /// immediately, so a lowered capacity retroactively evicts entries.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-positive or overflowing `kb`;
    /// capacity and entries are left unchanged.
    pub fn set_capacity(&mut self, kb: i64) -> Result<()> {
        if kb <= 0 {
            return Err(CacheError::InvalidArgument(format!(
                "Cache capacity must be positive, got {} KB",
                kb
            )));
        }

        self.capacity_bytes = (kb as usize).checked_mul(1024).ok_or_else(|| {
            CacheError::InvalidArgument(format!("Cache capacity overflows: {} KB", kb))
        })?;
        debug!("Capacity set to {} bytes", self.capacity_bytes);

        self.trim_to_capacity();
        Ok(())
    }

    // == Clear ==
    /// Disposes and removes every entry and resets the size accounting.
    pub fn clear(&mut self) {
        for mut entry in self.entries.drain(..) {
            if let Err(err) = self.backend.dispose(&mut entry) {
                warn!("Failed to dispose entry '{}' on clear: {}", entry.key(), err);
            }
        }
        self.current_size = 0;
        debug!("Cache cleared");
    }

    // == Describe ==
    /// Renders one line per entry with its key and byte size, for debugging.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "key={}; size={} bytes", entry.key(), entry.size());
        }
        out
    }

    // == Stats ==
    /// Returns a snapshot of cache statistics with current totals filled in.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats.set_total_bytes(self.current_size);
        stats
    }

    // == Trim ==
    /// Invokes the eviction policy and adopts its post-trim size.
    fn trim_to_capacity(&mut self) {
        let before = self.entries.len();
        self.current_size = self.policy.trim(
            &mut self.entries,
            self.current_size,
            self.capacity_bytes,
            self.backend.as_ref(),
        );

        let evicted = before - self.entries.len();
        if evicted > 0 {
            self.stats.record_evictions(evicted as u64);
            debug!(
                "Trimmed {} entries, size now {} bytes",
                evicted, self.current_size
            );
        }
    }
}
