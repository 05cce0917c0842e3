//! Login flow state machine.
//!
//! Type-safe state machine sequencing the primary factor and the
//! second-factor code check into one login decision. Transitions consume
//! the flow, so illegal orderings (submitting a code before the primary
//! factor passed, say) do not compile.

use std::marker::PhantomData;

use crate::decision::{LoginDecision, RejectionReason};

/// Login flow states.
pub mod states {
    /// No factor verified yet.
    #[derive(Debug, Clone, Copy)]
    pub struct Anonymous;

    /// Primary factor passed; a one-time code is still owed.
    #[derive(Debug, Clone, Copy)]
    pub struct SecondFactorPending;

    /// All required factors verified.
    #[derive(Debug, Clone, Copy)]
    pub struct Authenticated;

    /// Attempt rejected.
    #[derive(Debug, Clone, Copy)]
    pub struct Rejected;
}

/// Login flow context.
///
/// The generic parameter `S` is the current state, ensuring transitions
/// are checked at compile time.
#[derive(Debug)]
pub struct LoginFlow<S> {
    login: String,
    reason: Option<RejectionReason>,
    _state: PhantomData<S>,
}

impl<S> LoginFlow<S> {
    /// The login identity this flow is deciding for.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    fn transition<T>(self, reason: Option<RejectionReason>) -> LoginFlow<T> {
        LoginFlow {
            login: self.login,
            reason,
            _state: PhantomData,
        }
    }
}

impl LoginFlow<states::Anonymous> {
    /// Starts a flow for a login identity.
    #[must_use]
    pub fn begin(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            reason: None,
            _state: PhantomData,
        }
    }

    /// Primary credentials verified; branch on whether an active secret
    /// demands a second factor.
    #[must_use]
    pub fn primary_accepted(self, second_factor_required: bool) -> PrimaryOutcome {
        if second_factor_required {
            PrimaryOutcome::ChallengeRequired(self.transition(None))
        } else {
            PrimaryOutcome::Authenticated(self.transition(None))
        }
    }

    /// Primary credentials did not verify.
    #[must_use]
    pub fn primary_rejected(self) -> LoginFlow<states::Rejected> {
        self.transition(Some(RejectionReason::InvalidCredentials))
    }

    /// Second factor is enforced but this user has none configured.
    #[must_use]
    pub fn setup_required(self) -> LoginFlow<states::Rejected> {
        self.transition(Some(RejectionReason::SetupRequired))
    }
}

impl LoginFlow<states::SecondFactorPending> {
    /// Re-enters a pending flow whose challenge was issued by an earlier
    /// request. The code form round-trips through the gateway, so the
    /// pending state spans two requests; the caller is responsible for
    /// having verified the primary factor when the challenge was issued.
    #[must_use]
    pub fn resume(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            reason: None,
            _state: PhantomData,
        }
    }

    /// The form nonce failed verification: replay or forgery, terminal.
    #[must_use]
    pub fn nonce_rejected(self) -> LoginFlow<states::Rejected> {
        self.transition(Some(RejectionReason::NonceInvalid))
    }

    /// The submitted code verified.
    #[must_use]
    pub fn code_accepted(self) -> LoginFlow<states::Authenticated> {
        self.transition(None)
    }

    /// The submitted code was wrong. The flow stays at second-factor
    /// pending so the caller can re-render the code form (with a freshly
    /// issued nonce, never the consumed one) while the decision carries
    /// the rejection.
    #[must_use]
    pub fn code_rejected(self) -> Self {
        self.transition(Some(RejectionReason::CodeInvalid))
    }

    /// Decision for this state: not authenticated, code still owed.
    #[must_use]
    pub fn into_decision(self) -> LoginDecision {
        LoginDecision {
            login: self.login,
            second_factor_required: true,
            authenticated: false,
            failure: self.reason,
        }
    }
}

impl LoginFlow<states::Authenticated> {
    /// Decision for this state: session-ready.
    #[must_use]
    pub fn into_decision(self) -> LoginDecision {
        LoginDecision {
            login: self.login,
            second_factor_required: false,
            authenticated: true,
            failure: None,
        }
    }
}

impl LoginFlow<states::Rejected> {
    /// The reason this flow was rejected.
    #[must_use]
    pub fn reason(&self) -> Option<RejectionReason> {
        self.reason
    }

    /// Decision for this state: rejected with its typed reason.
    #[must_use]
    pub fn into_decision(self) -> LoginDecision {
        LoginDecision {
            login: self.login,
            second_factor_required: false,
            authenticated: false,
            failure: self.reason,
        }
    }
}

/// Outcome of the primary-factor check.
#[derive(Debug)]
pub enum PrimaryOutcome {
    /// No second factor configured; authenticated directly.
    Authenticated(LoginFlow<states::Authenticated>),
    /// An active secret exists; a code must be submitted next.
    ChallengeRequired(LoginFlow<states::SecondFactorPending>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_authentication_without_second_factor() {
        let flow = LoginFlow::begin("alice");
        match flow.primary_accepted(false) {
            PrimaryOutcome::Authenticated(flow) => {
                let decision = flow.into_decision();
                assert!(decision.authenticated);
                assert!(!decision.second_factor_required);
                assert!(decision.failure.is_none());
            }
            PrimaryOutcome::ChallengeRequired(_) => panic!("expected direct authentication"),
        }
    }

    #[test]
    fn challenge_then_code_accepted() {
        let flow = LoginFlow::begin("alice");
        let pending = match flow.primary_accepted(true) {
            PrimaryOutcome::ChallengeRequired(flow) => flow,
            PrimaryOutcome::Authenticated(_) => panic!("expected a challenge"),
        };

        let decision = pending.code_accepted().into_decision();
        assert!(decision.authenticated);
    }

    #[test]
    fn wrong_code_keeps_flow_pending() {
        let flow = LoginFlow::begin("alice");
        let pending = match flow.primary_accepted(true) {
            PrimaryOutcome::ChallengeRequired(flow) => flow,
            PrimaryOutcome::Authenticated(_) => panic!("expected a challenge"),
        };

        let pending = pending.code_rejected();
        let decision = pending.into_decision();
        assert!(!decision.authenticated);
        assert!(decision.second_factor_required);
        assert_eq!(decision.failure, Some(RejectionReason::CodeInvalid));
    }

    #[test]
    fn rejected_flows_carry_their_reason() {
        let decision = LoginFlow::begin("alice").primary_rejected().into_decision();
        assert_eq!(decision.failure, Some(RejectionReason::InvalidCredentials));

        let decision = LoginFlow::begin("bob").setup_required().into_decision();
        assert_eq!(decision.failure, Some(RejectionReason::SetupRequired));
    }
}
