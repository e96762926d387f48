//! Error types for the laundry store.

use thiserror::Error;

/// Main error type for store operations.
///
/// Lookups that find nothing are not errors: they come back as `None` or an
/// empty `Vec`. Only storage failures and domain conflicts end up here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error in '{key}': {message}")]
    Deserialization { key: String, message: String },

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: u32, got: u32 },

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    #[error("Store is locked by another process")]
    Locked,

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Export needs both a start and an end date")]
    MissingDateRange,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    /// Wrap a JSON parse failure for the value stored under `key`.
    pub fn deserialization(key: &str, err: serde_json::Error) -> Self {
        StoreError::Deserialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
