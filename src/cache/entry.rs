//! Cache Entry Module
//!
//! Defines a single key/value record and its backend-specific payload handle.

use std::path::PathBuf;

use bytes::Bytes;
use chrono::{DateTime, Utc};

// == Payload ==
/// Backend-specific representation of an entry's bytes.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Bytes held directly in memory
    Memory(Bytes),
    /// Bytes held in a backing file, with the recorded byte length
    File { path: PathBuf, len: usize },
}

impl Payload {
    /// Returns the byte length of the payload.
    ///
    /// For a file-backed payload this is the recorded length, not a fresh
    /// stat of the file.
    pub fn len(&self) -> usize {
        match self {
            Payload::Memory(bytes) => bytes.len(),
            Payload::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Cache Entry ==
/// Represents a single cache entry: key, payload handle and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The key paired with the payload
    key: String,
    /// Where the bytes live
    pub(crate) payload: Payload,
    /// Creation timestamp, fixed at first insertion
    created_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry for the given key and payload handle.
    pub(crate) fn new(key: impl Into<String>, payload: Payload) -> Self {
        Self {
            key: key.into(),
            payload,
            created_at: Utc::now(),
        }
    }

    /// Returns the entry's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Byte length of the payload, as recorded by the backend.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Timestamp of the entry's first insertion.
    ///
    /// An overwrite replaces the payload but keeps this stamp, matching the
    /// entry's fixed position in the eviction order.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
