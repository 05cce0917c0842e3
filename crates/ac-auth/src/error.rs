//! Authentication error types.
//!
//! Rejections (wrong credentials, replayed nonce, wrong code) are NOT
//! errors; they are [`LoginDecision`](crate::LoginDecision) outcomes
//! with typed reasons, so nothing is silently swallowed and nothing
//! user-facing distinguishes which check failed. The variants here are
//! for conditions the caller cannot recover by retrying a form.

use std::fmt;

use ac_nonce::NonceError;
use ac_storage::StorageError;
use ac_totp::OtpError;

/// Authentication operation errors.
#[derive(Debug)]
pub enum AuthError {
    /// An operation was invoked from the wrong flow state (e.g. a code
    /// submission for a login with no active secret).
    InvalidState,
    /// Secret storage failed.
    Storage(StorageError),
    /// The nonce guard backend failed.
    Nonce(NonceError),
    /// The one-time password engine refused its inputs (malformed stored
    /// secret, too-short requested secret length).
    Otp(OtpError),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState => write!(f, "invalid authentication state"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::Nonce(err) => write!(f, "nonce guard error: {err}"),
            Self::Otp(err) => write!(f, "one-time password error: {err}"),
            Self::Internal(msg) => write!(f, "internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Nonce(err) => Some(err),
            Self::Otp(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<NonceError> for AuthError {
    fn from(err: NonceError) -> Self {
        Self::Nonce(err)
    }
}

impl From<OtpError> for AuthError {
    fn from(err: OtpError) -> Self {
        Self::Otp(err)
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            AuthError::InvalidState.to_string(),
            "invalid authentication state"
        );

        let err = AuthError::from(StorageError::NotFound {
            login: "alice".to_string(),
        });
        assert!(err.to_string().contains("alice"));
    }
}
