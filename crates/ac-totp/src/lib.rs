//! # ac-totp
//!
//! Pure one-time-password engine: secret generation, TOTP/HOTP code
//! computation per RFC 4226/6238, windowed constant-time verification,
//! and the `otpauth://` provisioning URI. No I/O of any kind; callers
//! supply the clock where determinism matters.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod otp;
pub mod secret;
pub mod uri;

pub use error::{OtpError, OtpResult};
pub use otp::{OtpAlgorithm, TotpConfig};
pub use secret::{decode_secret, generate_secret, DEFAULT_SECRET_BYTES, MIN_SECRET_BYTES};
pub use uri::provisioning_uri;
