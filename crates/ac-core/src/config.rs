//! Configuration for the second-factor core.
//!
//! One struct covers the knobs the deployment may tune; everything has a
//! working default so an embedding application can start from
//! `TwoFactorConfig::default()` and override selectively.

use serde::{Deserialize, Serialize};

/// Configuration for second-factor authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorConfig {
    /// Issuer label shown in authenticator apps and embedded in the
    /// provisioning URI (e.g. "Example Analytics").
    pub issuer: String,
    /// When enabled, users whose primary credentials pass but who have no
    /// active secret are rejected instead of being logged in directly.
    pub enforce_second_factor: bool,
    /// Accepted clock drift during login, in time steps either side of now.
    pub login_window: u8,
    /// Accepted clock drift while confirming a newly paired secret. Wider
    /// than `login_window` to tolerate device clock skew during pairing.
    pub pairing_window: u8,
    /// Lifetime of an issued form nonce, in seconds.
    pub nonce_ttl_secs: u64,
    /// Length of generated secrets in bytes. 20 bytes (160 bits) is the
    /// RFC 4226 recommendation; values below 10 bytes are refused.
    pub secret_length: usize,
}

impl Default for TwoFactorConfig {
    fn default() -> Self {
        Self {
            issuer: "authcode".to_string(),
            enforce_second_factor: false,
            login_window: 1,
            pairing_window: 2,
            nonce_ttl_secs: 3600,
            secret_length: 20,
        }
    }
}

impl TwoFactorConfig {
    /// Creates a configuration with the given issuer label and defaults
    /// for everything else.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            ..Self::default()
        }
    }

    /// Requires an active second factor for every login.
    #[must_use]
    pub const fn enforced(mut self) -> Self {
        self.enforce_second_factor = true;
        self
    }

    /// Sets the login drift window in time steps.
    #[must_use]
    pub const fn login_window(mut self, steps: u8) -> Self {
        self.login_window = steps;
        self
    }

    /// Sets the pairing drift window in time steps.
    #[must_use]
    pub const fn pairing_window(mut self, steps: u8) -> Self {
        self.pairing_window = steps;
        self
    }

    /// Sets the nonce lifetime in seconds.
    #[must_use]
    pub const fn nonce_ttl_secs(mut self, secs: u64) -> Self {
        self.nonce_ttl_secs = secs;
        self
    }
}
