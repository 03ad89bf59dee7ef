//! Storage Backend Module
//!
//! Abstracts how an entry's payload is physically held: an in-memory buffer
//! or a file on disk.

use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use crate::cache::{CacheEntry, Payload};
use crate::error::{CacheError, Result};

// == Storage Backend Trait ==
/// Capability for materializing, replacing, reading and reclaiming payloads.
///
/// Implementations are stateless collaborators: they hold no references to
/// entries between calls. The store removes an entry from its sequence before
/// disposing it, so a disposed entry is never read again.
pub trait StorageBackend: Debug + Send + Sync {
    /// Materializes `data` into a new entry for `key`.
    ///
    /// The returned entry's `size()` equals `data.len()`.
    fn store(&self, key: &str, data: &[u8]) -> Result<CacheEntry>;

    /// Replaces the payload of an existing entry in place.
    fn update(&self, entry: &mut CacheEntry, data: &[u8]) -> Result<()>;

    /// Reads the current payload of an entry.
    fn read(&self, entry: &CacheEntry) -> Result<Bytes>;

    /// Releases the resources held by an entry's payload.
    fn dispose(&self, entry: &mut CacheEntry) -> Result<()>;
}

// == Memory Backend ==
/// Holds payloads directly in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl MemoryBackend {
    /// Creates a new in-memory backend.
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for MemoryBackend {
    fn store(&self, key: &str, data: &[u8]) -> Result<CacheEntry> {
        Ok(CacheEntry::new(
            key,
            Payload::Memory(Bytes::copy_from_slice(data)),
        ))
    }

    fn update(&self, entry: &mut CacheEntry, data: &[u8]) -> Result<()> {
        entry.payload = Payload::Memory(Bytes::copy_from_slice(data));
        Ok(())
    }

    fn read(&self, entry: &CacheEntry) -> Result<Bytes> {
        match &entry.payload {
            Payload::Memory(bytes) => Ok(bytes.clone()),
            Payload::File { .. } => Err(CacheError::InvalidArgument(
                "entry is not held in memory".to_string(),
            )),
        }
    }

    fn dispose(&self, entry: &mut CacheEntry) -> Result<()> {
        entry.payload = Payload::Memory(Bytes::new());
        Ok(())
    }
}

// == File Backend ==
/// Holds each payload in its own file under a dedicated directory.
///
/// Reads verify the byte count on disk against the recorded length and fail
/// with `ReadMismatch` on disagreement.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    // == Constructor ==
    /// Creates the backend, creating `dir` if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the directory blob files are written under.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn blob_path(&self) -> PathBuf {
        self.dir.join(format!("blob-{}.bin", Uuid::new_v4()))
    }
}

impl StorageBackend for FileBackend {
    fn store(&self, key: &str, data: &[u8]) -> Result<CacheEntry> {
        let path = self.blob_path();
        fs::write(&path, data)?;
        debug!(
            "Wrote blob file: key={}, path={}, len={}",
            key,
            path.display(),
            data.len()
        );
        Ok(CacheEntry::new(
            key,
            Payload::File {
                path,
                len: data.len(),
            },
        ))
    }

    fn update(&self, entry: &mut CacheEntry, data: &[u8]) -> Result<()> {
        match &mut entry.payload {
            Payload::File { path, len } => {
                fs::write(&*path, data)?;
                *len = data.len();
                Ok(())
            }
            Payload::Memory(_) => Err(CacheError::InvalidArgument(
                "entry is not file-backed".to_string(),
            )),
        }
    }

    fn read(&self, entry: &CacheEntry) -> Result<Bytes> {
        match &entry.payload {
            Payload::File { path, len } => {
                let data = fs::read(path)?;
                if data.len() != *len {
                    return Err(CacheError::ReadMismatch {
                        key: entry.key().to_string(),
                        expected: *len,
                        actual: data.len(),
                    });
                }
                Ok(Bytes::from(data))
            }
            Payload::Memory(_) => Err(CacheError::InvalidArgument(
                "entry is not file-backed".to_string(),
            )),
        }
    }

    fn dispose(&self, entry: &mut CacheEntry) -> Result<()> {
        match &mut entry.payload {
            Payload::File { path, len } => {
                fs::remove_file(&*path)?;
                *len = 0;
                Ok(())
            }
            Payload::Memory(_) => Ok(()),
        }
    }
}
