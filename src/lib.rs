//! Blobcache - a bounded byte-blob key/value cache
//!
//! Retains binary payloads under a configurable byte budget with
//! insertion-order eviction (FIFO or LIFO) and pluggable payload storage
//! (in-memory buffers or files on disk).

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats, CacheStore};
pub use config::{BackendKind, CacheConfig, EvictionStrategy};
pub use error::{CacheError, Result};
