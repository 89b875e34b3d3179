//! Error types for LodeKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LodeError
pub type Result<T> = std::result::Result<T, LodeError>;

/// Unified error type for LodeKV operations
#[derive(Debug, Error)]
pub enum LodeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decode / Corruption Errors
    // -------------------------------------------------------------------------
    #[error("corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("key not found")]
    KeyNotFound,

    #[error("no chunk for shard {0}")]
    ShardMissing(u32),
}
