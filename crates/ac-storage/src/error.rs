//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No secret record exists for the login.
    #[error("no secret record for login '{login}'")]
    NotFound {
        /// The login identity that was looked up.
        login: String,
    },

    /// Record could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend-specific failure.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
