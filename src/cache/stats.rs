//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or unreadable)
    pub misses: u64,
    /// Number of new keys inserted
    pub insertions: u64,
    /// Number of in-place payload replacements
    pub updates: u64,
    /// Number of entries evicted by the trimming policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current total payload size in bytes
    pub total_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the insertion counter.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Increments the update counter.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Adds `count` to the eviction counter.
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    /// Updates the total payload size.
    pub fn set_total_bytes(&mut self, bytes: usize) {
        self.total_bytes = bytes;
    }
}
