//! Audit events for second-factor authentication.
//!
//! Rejections carry a typed reason internally while the user-facing
//! message stays generic, so audit logs can distinguish a replayed form
//! from a wrong code without handing an attacker the same distinction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Primary-factor login attempt.
    Login,
    /// Primary-factor login failed.
    LoginError,
    /// Second-factor code challenge presented.
    SecondFactorChallenge,
    /// Second-factor code accepted.
    SecondFactorSuccess,
    /// Second-factor code or nonce rejected.
    SecondFactorError,
    /// Inactive secret provisioned for a user.
    SecretProvisioned,
    /// Secret confirmed and activated.
    SecretActivated,
    /// Secret deactivated.
    SecretDeactivated,
    /// Secret material replaced.
    SecretRotated,
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// Operation succeeded.
    Success,
    /// Operation was rejected.
    Rejected,
}

/// An audit record for a security-relevant event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event_type: EventType,
    /// Login identity the event concerns.
    pub login: String,
    /// Success or rejection.
    pub outcome: EventOutcome,
    /// Internal reason code for rejections (never shown to the user).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuthEvent {
    /// Creates a success event.
    #[must_use]
    pub fn success(event_type: EventType, login: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            login: login.into(),
            outcome: EventOutcome::Success,
            reason: None,
        }
    }

    /// Creates a rejection event with an internal reason code.
    #[must_use]
    pub fn rejected(
        event_type: EventType,
        login: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            login: login.into(),
            outcome: EventOutcome::Rejected,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_event_has_no_reason() {
        let event = AuthEvent::success(EventType::Login, "alice");
        assert_eq!(event.outcome, EventOutcome::Success);
        assert!(event.reason.is_none());
    }

    #[test]
    fn rejection_keeps_internal_reason() {
        let event = AuthEvent::rejected(EventType::SecondFactorError, "alice", "nonce_invalid");
        assert_eq!(event.outcome, EventOutcome::Rejected);
        assert_eq!(event.reason.as_deref(), Some("nonce_invalid"));
    }

    #[test]
    fn event_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&EventType::SecondFactorError).unwrap();
        assert_eq!(json, "\"SECOND_FACTOR_ERROR\"");
    }

    #[test]
    fn reason_is_omitted_from_success_json() {
        let event = AuthEvent::success(EventType::SecretActivated, "bob");
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("reason"));
    }
}
