//! Nonce guard error types.

use thiserror::Error;

/// Errors from a nonce guard backend.
///
/// Note that a missing, expired, or mismatched token is NOT an error:
/// `verify_and_consume` reports that as `false`. Errors are reserved for
/// backend failures (a distributed guard losing its connection, say).
#[derive(Debug, Error)]
pub enum NonceError {
    /// Backend-specific failure.
    #[error("internal nonce guard error: {0}")]
    Internal(String),
}

/// Result type for nonce guard operations.
pub type NonceResult<T> = Result<T, NonceError>;
