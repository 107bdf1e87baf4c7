//! Error types for the storage layer.

use thiserror::Error;

/// Failure writing to or removing from a [`crate::storage::KeyValueStore`].
///
/// Reads never produce this: an unreadable value is treated as absent.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend refused the write (quota exceeded, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
