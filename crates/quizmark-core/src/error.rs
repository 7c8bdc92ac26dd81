//! Key-value store error types.
//!
//! These errors represent failures of the persistence layer that stores quiz
//! progress. Grading itself never fails, so this is the only typed error in
//! the core crate.

use thiserror::Error;

/// Errors that can occur when reading or writing a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write would push the store past its size limit.
    #[error("quota exceeded: {requested} bytes requested, limit is {limit} bytes")]
    QuotaExceeded { limit: usize, requested: usize },

    /// The store cannot be reached at all (e.g. disabled or poisoned).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns `true` if retrying the same write can never succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}
