//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Rejected caller input (empty key or payload, non-positive capacity)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A backend read returned a different byte count than recorded
    #[error("Read mismatch for key '{key}': expected {expected} bytes, got {actual}")]
    ReadMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// Underlying I/O failure from a file-backed payload
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
