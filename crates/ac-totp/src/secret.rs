//! Shared-secret generation and transcription.
//!
//! Secrets are random byte strings, base32-encoded (RFC 4648 alphabet,
//! no padding) so users can transcribe them into an authenticator app
//! when QR scanning is unavailable.

use base32::Alphabet;
use rand::Rng;

use crate::error::{OtpError, OtpResult};

/// Minimum secret length in bytes (80 bits), the practical floor for
/// brute-force resistance.
pub const MIN_SECRET_BYTES: usize = 10;

/// Default secret length in bytes (160 bits), the RFC 4226 recommendation.
pub const DEFAULT_SECRET_BYTES: usize = 20;

const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Generates a fresh base32-encoded secret of `byte_length` random bytes.
///
/// # Errors
///
/// Returns [`OtpError::SecretTooShort`] if `byte_length` is below
/// [`MIN_SECRET_BYTES`]. That is a programming mistake in the caller, not
/// a user-input condition, and should propagate as a hard error.
pub fn generate_secret(byte_length: usize) -> OtpResult<String> {
    if byte_length < MIN_SECRET_BYTES {
        return Err(OtpError::SecretTooShort {
            requested: byte_length,
            minimum: MIN_SECRET_BYTES,
        });
    }

    let mut rng = rand::rng();
    let mut bytes = vec![0u8; byte_length];
    rng.fill(&mut bytes[..]);

    Ok(base32::encode(ALPHABET, &bytes))
}

/// Decodes a base32 secret back to raw key bytes.
///
/// # Errors
///
/// Returns [`OtpError::MalformedSecret`] if the input is not valid
/// base32. Stored secrets only ever come from [`generate_secret`] or an
/// operator, so a decode failure is a data problem, not user input.
pub fn decode_secret(secret: &str) -> OtpResult<Vec<u8>> {
    base32::decode(ALPHABET, secret).ok_or(OtpError::MalformedSecret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_round_trips() {
        let secret = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        let bytes = decode_secret(&secret).unwrap();
        assert_eq!(bytes.len(), DEFAULT_SECRET_BYTES);
    }

    #[test]
    fn secrets_are_unique() {
        let a = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        let b = generate_secret(DEFAULT_SECRET_BYTES).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn too_short_request_is_refused() {
        let err = generate_secret(MIN_SECRET_BYTES - 1).unwrap_err();
        assert!(matches!(
            err,
            OtpError::SecretTooShort {
                requested: 9,
                minimum: MIN_SECRET_BYTES
            }
        ));
    }

    #[test]
    fn minimum_length_is_accepted() {
        assert!(generate_secret(MIN_SECRET_BYTES).is_ok());
    }

    #[test]
    fn garbage_secret_fails_to_decode() {
        assert!(matches!(
            decode_secret("not!base32@"),
            Err(OtpError::MalformedSecret)
        ));
    }
}
