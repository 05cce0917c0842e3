//! One-time password error types.

use thiserror::Error;

/// Errors from the one-time password engine.
///
/// Every variant here indicates a configuration or data problem, never
/// bad user input: a malformed *submitted* code verifies as `false`
/// instead of erroring.
#[derive(Debug, Error)]
pub enum OtpError {
    /// Requested secret length is below the brute-force floor.
    #[error("secret length of {requested} bytes is below the {minimum}-byte minimum")]
    SecretTooShort {
        /// Requested length in bytes.
        requested: usize,
        /// Minimum accepted length in bytes.
        minimum: usize,
    },

    /// Configured digit count is outside the RFC 4226 range.
    #[error("{requested} digits is outside the supported 6..=8 range")]
    InvalidDigits {
        /// Configured digit count.
        requested: u8,
    },

    /// A stored secret could not be decoded as base32.
    #[error("stored secret is not valid base32")]
    MalformedSecret,

    /// The system clock is before the Unix epoch.
    #[error("system clock error: {0}")]
    Clock(String),
}

/// Result type for one-time password operations.
pub type OtpResult<T> = Result<T, OtpError>;
