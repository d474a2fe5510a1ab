//! Error types for key-value store operations.

use thiserror::Error;

/// Error type for key-value store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A stored value could not be encoded or decoded.
    #[error("codec error for key {key}: {reason}")]
    Codec {
        /// Printable form of the key.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Storage error from the underlying backend.
    #[error("storage error: {0}")]
    Storage(String),

    /// Lock was poisoned.
    #[error("lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Builds a codec error for `key`.
    pub fn codec(key: &[u8], reason: impl ToString) -> Self {
        Self::Codec { key: String::from_utf8_lossy(key).into_owned(), reason: reason.to_string() }
    }
}
