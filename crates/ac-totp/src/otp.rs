//! TOTP code generation and verification.
//!
//! Implements HOTP (RFC 4226) over the 8-byte big-endian time counter
//! `floor(unix / period)` (RFC 6238). Verification walks a configurable
//! window of counters either side of now and compares in constant time.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{OtpError, OtpResult};
use crate::secret::decode_secret;

/// Hash algorithm for the HMAC step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (default; what authenticator apps interoperate on).
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl OtpAlgorithm {
    /// Returns the algorithm name for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    fn mac(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        fn digest<M: Mac + hmac::digest::KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
            // HMAC accepts keys of any length.
            let mut mac = <M as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }

        match self {
            Self::Sha1 => digest::<Hmac<Sha1>>(key, data),
            Self::Sha256 => digest::<Hmac<Sha256>>(key, data),
            Self::Sha512 => digest::<Hmac<Sha512>>(key, data),
        }
    }
}

/// TOTP parameters: digit count, time step, and hash algorithm.
///
/// These are deployment constants shared between this engine and the
/// user's authenticator app, so the defaults (6 digits, 30 seconds,
/// SHA-1) should rarely change.
#[derive(Debug, Clone, Copy)]
pub struct TotpConfig {
    /// Number of digits in a code.
    pub digits: u8,
    /// Time step in seconds.
    pub period: u32,
    /// HMAC hash algorithm.
    pub algorithm: OtpAlgorithm,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            period: 30,
            algorithm: OtpAlgorithm::Sha1,
        }
    }
}

impl TotpConfig {
    /// Creates a configuration with interoperable defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of digits.
    #[must_use]
    pub const fn digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    /// Sets the time step in seconds.
    #[must_use]
    pub const fn period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Sets the hash algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: OtpAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Generates the code for the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is malformed or the clock is
    /// before the Unix epoch.
    pub fn generate_now(&self, secret: &str) -> OtpResult<String> {
        self.generate_at(secret, unix_now()?)
    }

    /// Generates the code for an explicit Unix timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::MalformedSecret`] if the secret does not
    /// decode as base32, or [`OtpError::InvalidDigits`] for a digit
    /// count outside 6..=8.
    pub fn generate_at(&self, secret: &str, timestamp: u64) -> OtpResult<String> {
        self.check_digits()?;
        let key = decode_secret(secret)?;
        Ok(self.hotp(&key, timestamp / u64::from(self.period)))
    }

    /// Verifies a submitted code against the current time, accepting any
    /// counter within `window` steps either side of now.
    ///
    /// Malformed submitted codes (wrong length, non-digit characters)
    /// verify as `false` rather than erroring; only a malformed *stored*
    /// secret or a broken clock is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is malformed or the clock is
    /// before the Unix epoch.
    pub fn verify_now(&self, secret: &str, code: &str, window: u8) -> OtpResult<bool> {
        self.verify_at(secret, code, unix_now()?, window)
    }

    /// Verifies a submitted code at an explicit Unix timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::MalformedSecret`] if the secret does not
    /// decode as base32.
    pub fn verify_at(&self, secret: &str, code: &str, timestamp: u64, window: u8) -> OtpResult<bool> {
        self.check_digits()?;
        if !self.is_well_formed(code) {
            return Ok(false);
        }

        let key = decode_secret(secret)?;
        let current = timestamp / u64::from(self.period);

        // Walk outward from the current counter so the common case (no
        // drift) is checked first. Every candidate is compared in
        // constant time; the early return on match leaks only which
        // counter matched, not secret material.
        for offset in 0..=u64::from(window) {
            let ahead = self.hotp(&key, current.saturating_add(offset));
            if constant_time_eq(code.as_bytes(), ahead.as_bytes()) {
                return Ok(true);
            }

            if offset > 0 {
                let behind = self.hotp(&key, current.saturating_sub(offset));
                if constant_time_eq(code.as_bytes(), behind.as_bytes()) {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Truncation yields at most 31 bits, so more than 8 digits can
    /// never be filled; fewer than 6 is too guessable.
    fn check_digits(&self) -> OtpResult<()> {
        if (6..=8).contains(&self.digits) {
            Ok(())
        } else {
            Err(OtpError::InvalidDigits {
                requested: self.digits,
            })
        }
    }

    fn is_well_formed(&self, code: &str) -> bool {
        code.len() == usize::from(self.digits) && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// RFC 4226 HOTP: HMAC over the big-endian counter, then dynamic
    /// truncation (§5.3) to a zero-padded decimal string.
    fn hotp(&self, key: &[u8], counter: u64) -> String {
        let mac = self.algorithm.mac(key, &counter.to_be_bytes());

        let offset = usize::from(mac.last().copied().unwrap_or(0) & 0x0f);
        let truncated = u32::from_be_bytes([
            mac.get(offset).copied().unwrap_or(0) & 0x7f,
            mac.get(offset + 1).copied().unwrap_or(0),
            mac.get(offset + 2).copied().unwrap_or(0),
            mac.get(offset + 3).copied().unwrap_or(0),
        ]);

        let code = truncated % 10_u32.pow(u32::from(self.digits));
        format!("{code:0width$}", width = usize::from(self.digits))
    }
}

fn unix_now() -> OtpResult<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| OtpError::Clock(e.to_string()))?
        .as_secs())
}

/// Constant-time comparison of two byte slices.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
