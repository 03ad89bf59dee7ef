//! Configuration Module
//!
//! Construction-time cache options, loadable from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY_BYTES;
use crate::error::CacheError;

// == Eviction Strategy ==
/// Selects the eviction policy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionStrategy {
    /// First stored, first evicted
    Fifo,
    /// Last stored, first evicted
    Lifo,
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FIFO" => Ok(EvictionStrategy::Fifo),
            "LIFO" => Ok(EvictionStrategy::Lifo),
            other => Err(CacheError::InvalidArgument(format!(
                "Unknown eviction strategy: {}",
                other
            ))),
        }
    }
}

// == Backend Kind ==
/// Selects the storage backend variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BackendKind {
    /// Payloads held in in-memory buffers
    Memory,
    /// Payloads held in files under the cache directory
    File,
}

impl FromStr for BackendKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MEMORY" => Ok(BackendKind::Memory),
            "FILE" => Ok(BackendKind::File),
            other => Err(CacheError::InvalidArgument(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }
}

// == Cache Config ==
/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Eviction strategy applied when the store exceeds its byte budget
    pub policy: EvictionStrategy,
    /// Where entry payloads are physically held
    pub backend: BackendKind,
    /// Initial maximum cache size in bytes
    pub capacity_bytes: usize,
    /// Directory for file-backed payloads (system temp dir if unset)
    pub cache_dir: Option<PathBuf>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - Eviction strategy, `FIFO` or `LIFO` (default: FIFO)
    /// - `CACHE_BACKEND` - Storage backend, `MEMORY` or `FILE` (default: MEMORY)
    /// - `CACHE_CAPACITY_BYTES` - Maximum cache size in bytes (default: 20480)
    /// - `CACHE_DIR` - Directory for file-backed payloads (default: unset)
    pub fn from_env() -> Self {
        Self {
            policy: env::var("CACHE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(EvictionStrategy::Fifo),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(BackendKind::Memory),
            capacity_bytes: env::var("CACHE_CAPACITY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY_BYTES),
            cache_dir: env::var("CACHE_DIR").ok().map(PathBuf::from),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: EvictionStrategy::Fifo,
            backend: BackendKind::Memory,
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            cache_dir: None,
        }
    }
}
