//! Error types for the balanced index.

use thiserror::Error;

use crate::record::RecordId;

/// Result type alias using IndexError.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors raised at the boundaries of the index.
///
/// The tree algorithms themselves are total; everything here is about
/// input that never should have reached them.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A record carried a NaN or infinite sort key.
    #[error("sort key must be finite, got {value}")]
    NonFiniteKey { value: f64 },

    /// A record id that is already present in the catalog.
    #[error("duplicate record id {id}")]
    DuplicateId { id: RecordId },

    /// A structural check over a tree failed.
    #[error("tree corrupted: {0}")]
    Corrupted(String),

    /// A stress test configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
