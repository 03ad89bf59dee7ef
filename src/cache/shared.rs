//! Shared Cache Module
//!
//! Clonable, thread-safe handle around the cache store.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::cache::{
    CacheStats, CacheStore, EvictionPolicy, FifoPolicy, FileBackend, LifoPolicy, MemoryBackend,
    StorageBackend,
};
use crate::config::{BackendKind, CacheConfig, EvictionStrategy};
use crate::error::{CacheError, Result};

// == Cache ==
/// Thread-safe cache handle, shared by cloning.
///
/// The whole store sits behind a single lock, so exactly one operation
/// executes at a time against a given store instance. The eviction policy
/// and storage backend are chosen once, at construction.
#[derive(Debug, Clone)]
pub struct Cache {
    /// The store under its coarse-grained lock
    inner: Arc<Mutex<CacheStore>>,
}

impl Cache {
    // == Constructor ==
    /// Builds a cache from its configuration.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a zero capacity and surfaces I/O
    /// failures from cache-directory creation for the file backend.
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.capacity_bytes == 0 {
            return Err(CacheError::InvalidArgument(
                "Cache capacity must be positive".to_string(),
            ));
        }

        let policy: Box<dyn EvictionPolicy> = match config.policy {
            EvictionStrategy::Fifo => Box::new(FifoPolicy),
            EvictionStrategy::Lifo => Box::new(LifoPolicy),
        };

        let backend: Box<dyn StorageBackend> = match config.backend {
            BackendKind::Memory => Box::new(MemoryBackend::new()),
            BackendKind::File => {
                let dir = config
                    .cache_dir
                    .unwrap_or_else(|| std::env::temp_dir().join("blobcache"));
                Box::new(FileBackend::new(dir)?)
            }
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(CacheStore::new(
                policy,
                backend,
                config.capacity_bytes,
            ))),
        })
    }

    // == Put ==
    /// Stores `data` under `key`, evicting per policy if over budget.
    pub fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.inner.lock().put(key, data)
    }

    // == Get ==
    /// Retrieves the payload stored under `key`, if present and readable.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.lock().get(key)
    }

    // == Size ==
    /// Returns the total size of the stored payloads in bytes.
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Set Capacity ==
    /// Reconfigures the byte budget from a kilobyte count, trimming
    /// immediately.
    pub fn set_capacity(&self, kb: i64) -> Result<()> {
        self.inner.lock().set_capacity(kb)
    }

    // == Clear ==
    /// Disposes and removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    // == Stats ==
    /// Returns a snapshot of cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == Describe ==
    /// Renders one line per entry with its key and byte size, for debugging.
    pub fn describe(&self) -> String {
        self.inner.lock().describe()
    }
}
