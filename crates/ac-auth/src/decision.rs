//! Login decisions and rejection reasons.

/// Why a login attempt was rejected.
///
/// Retained internally for audit logs. User-facing output must go
/// through [`user_message`](RejectionReason::user_message), which is
/// identical for every reason so an attacker cannot tell a replayed
/// request from a wrong code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Primary credentials did not verify.
    InvalidCredentials,
    /// Form nonce was missing, expired, mismatched, or already consumed.
    NonceInvalid,
    /// Submitted one-time code was wrong, malformed, or stale.
    CodeInvalid,
    /// Second factor is enforced but the user has no active secret.
    SetupRequired,
}

impl RejectionReason {
    /// Internal reason code for audit records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::NonceInvalid => "nonce_invalid",
            Self::CodeInvalid => "code_invalid",
            Self::SetupRequired => "setup_required",
        }
    }

    /// The one generic message shown to users for any rejection.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        "Authentication failed. Please check your input and try again."
    }
}

/// The outcome of one authentication request.
///
/// Transient: computed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDecision {
    /// Login identity the decision concerns.
    pub login: String,
    /// Whether a second-factor code must still be presented.
    pub second_factor_required: bool,
    /// Whether the user is authenticated and a session may be created.
    pub authenticated: bool,
    /// Typed reason when the attempt was rejected.
    pub failure: Option<RejectionReason>,
}

impl LoginDecision {
    /// Generic user-facing message for a rejected decision, `None` when
    /// nothing failed.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        self.failure.map(|reason| reason.user_message())
    }

    /// Checks whether this decision rejects the attempt.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        self.failure.is_some()
    }
}
