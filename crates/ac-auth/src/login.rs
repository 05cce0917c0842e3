//! Login orchestration.
//!
//! [`LoginService`] wires the primary-factor collaborator, the secret
//! store, the nonce guard, and the one-time password engine into single
//! login decisions. It holds no per-request state of its own; the flow
//! state lives in the caller's session and in the typestate machine.

use std::sync::Arc;

use ac_core::{AuthEvent, EventOutcome, EventType, TwoFactorConfig};
use ac_nonce::NonceGuard;
use ac_storage::{SecretRecord, SecretStore};
use ac_totp::{generate_secret, provisioning_uri, TotpConfig};

use crate::confirm::ConfirmedSecret;
use crate::decision::{LoginDecision, RejectionReason};
use crate::error::{AuthError, AuthResult};
use crate::flow::{LoginFlow, PrimaryOutcome};
use crate::primary::PrimaryAuthenticator;

/// Nonce purpose protecting the login and code forms.
pub const LOGIN_NONCE_PURPOSE: &str = "login";

/// Nonce purpose protecting the secret-rotation form.
pub const ROTATION_NONCE_PURPOSE: &str = "save-authcode";

/// Everything a gateway needs to render a pairing page: the secret for
/// manual entry, the provisioning URI for the QR renderer, and the nonce
/// the confirmation form must return.
#[derive(Debug)]
pub struct ProvisioningSetup {
    /// Login identity being provisioned.
    pub login: String,
    /// Base32 secret.
    pub secret: String,
    /// `otpauth://` provisioning URI.
    pub uri: String,
    /// Single-use token for the confirmation submission.
    pub rotation_nonce: String,
}

/// Outcome of a secret-rotation request.
#[derive(Debug)]
pub enum RotationOutcome {
    /// The proposed secret was confirmed, stored, and activated.
    Activated(SecretRecord),
    /// The request was rejected; the typed reason is for audit only.
    Rejected(RejectionReason),
}

/// Orchestrates primary- and second-factor checks into login decisions.
pub struct LoginService {
    config: TwoFactorConfig,
    totp: TotpConfig,
    primary: Arc<dyn PrimaryAuthenticator>,
    secrets: Arc<dyn SecretStore>,
    nonces: Arc<dyn NonceGuard>,
}

impl LoginService {
    /// Creates a service over the given collaborators with default TOTP
    /// parameters (6 digits, 30 s, SHA-1).
    #[must_use]
    pub fn new(
        config: TwoFactorConfig,
        primary: Arc<dyn PrimaryAuthenticator>,
        secrets: Arc<dyn SecretStore>,
        nonces: Arc<dyn NonceGuard>,
    ) -> Self {
        Self {
            config,
            totp: TotpConfig::default(),
            primary,
            secrets,
            nonces,
        }
    }

    /// Overrides the TOTP parameters.
    #[must_use]
    pub fn with_totp(mut self, totp: TotpConfig) -> Self {
        self.totp = totp;
        self
    }

    /// The TOTP parameters in effect (shared with authenticator apps).
    #[must_use]
    pub fn totp(&self) -> &TotpConfig {
        &self.totp
    }

    /// Issues the nonce the gateway embeds in the login or code form.
    ///
    /// # Errors
    ///
    /// Returns an error if the nonce guard backend fails.
    pub async fn issue_login_nonce(&self, login: &str) -> AuthResult<String> {
        Ok(self.nonces.issue(LOGIN_NONCE_PURPOSE, login).await?)
    }

    /// Handles a primary-credential submission.
    ///
    /// On success the decision either authenticates directly (no active
    /// secret) or demands a second factor; the gateway then renders the
    /// code form with a nonce from [`issue_login_nonce`].
    ///
    /// [`issue_login_nonce`]: LoginService::issue_login_nonce
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures; a wrong credential is
    /// a rejected decision, not an error.
    pub async fn submit_primary(&self, login: &str, credential: &str) -> AuthResult<LoginDecision> {
        let flow = LoginFlow::begin(login);

        if !self
            .primary
            .verify_primary_credential(login, credential)
            .await?
        {
            self.audit(&AuthEvent::rejected(
                EventType::LoginError,
                login,
                RejectionReason::InvalidCredentials.as_str(),
            ));
            return Ok(flow.primary_rejected().into_decision());
        }

        let record = self.secrets.load(login).await?;
        let second_factor_required = record
            .as_ref()
            .is_some_and(SecretRecord::requires_second_factor);

        if !second_factor_required && self.config.enforce_second_factor {
            self.audit(&AuthEvent::rejected(
                EventType::LoginError,
                login,
                RejectionReason::SetupRequired.as_str(),
            ));
            return Ok(flow.setup_required().into_decision());
        }

        let decision = match flow.primary_accepted(second_factor_required) {
            PrimaryOutcome::Authenticated(flow) => {
                self.audit(&AuthEvent::success(EventType::Login, login));
                flow.into_decision()
            }
            PrimaryOutcome::ChallengeRequired(flow) => {
                self.audit(&AuthEvent::success(EventType::SecondFactorChallenge, login));
                flow.into_decision()
            }
        };

        Ok(decision)
    }

    /// Handles a second-factor code submission.
    ///
    /// The nonce is consumed before anything else; a failed nonce is
    /// terminal for this attempt. A wrong code leaves the login at
    /// second-factor pending so the gateway re-renders the form with a
    /// freshly issued nonce.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidState`] when the login has no active
    /// secret (the code form should never have been reachable), or a
    /// backend error.
    pub async fn submit_code(
        &self,
        login: &str,
        code: &str,
        nonce: &str,
    ) -> AuthResult<LoginDecision> {
        let pending = LoginFlow::resume(login);

        if !self
            .nonces
            .verify_and_consume(LOGIN_NONCE_PURPOSE, login, nonce)
            .await?
        {
            self.audit(&AuthEvent::rejected(
                EventType::SecondFactorError,
                login,
                RejectionReason::NonceInvalid.as_str(),
            ));
            return Ok(pending.nonce_rejected().into_decision());
        }

        let record = self
            .secrets
            .load(login)
            .await?
            .filter(SecretRecord::requires_second_factor)
            .ok_or(AuthError::InvalidState)?;

        if self
            .totp
            .verify_now(&record.secret, code, self.config.login_window)?
        {
            self.audit(&AuthEvent::success(EventType::SecondFactorSuccess, login));
            Ok(pending.code_accepted().into_decision())
        } else {
            self.audit(&AuthEvent::rejected(
                EventType::SecondFactorError,
                login,
                RejectionReason::CodeInvalid.as_str(),
            ));
            Ok(pending.code_rejected().into_decision())
        }
    }

    /// Ensures an inactive record exists for the login and returns the
    /// pairing material (secret, provisioning URI, rotation nonce).
    ///
    /// Idempotent: an existing record keeps its secret.
    ///
    /// # Errors
    ///
    /// Returns an error if secret generation is misconfigured or a
    /// backend fails.
    pub async fn begin_provisioning(&self, login: &str) -> AuthResult<ProvisioningSetup> {
        let fresh = generate_secret(self.config.secret_length)?;
        let record = self.secrets.provision_if_absent(login, &fresh).await?;

        if record.secret == fresh {
            self.audit(&AuthEvent::success(EventType::SecretProvisioned, login));
        }

        self.setup_for(login, record.secret).await
    }

    /// Proposes a fresh secret for rotation without storing anything.
    ///
    /// The secret only reaches the store once
    /// [`provision_and_activate`](LoginService::provision_and_activate)
    /// confirms the user's authenticator produces codes for it.
    ///
    /// # Errors
    ///
    /// Returns an error if secret generation is misconfigured or the
    /// nonce guard fails.
    pub async fn propose_rotation(&self, login: &str) -> AuthResult<ProvisioningSetup> {
        let fresh = generate_secret(self.config.secret_length)?;
        self.setup_for(login, fresh).await
    }

    /// Verifies a confirmation code against a proposed secret with the
    /// wider pairing drift window.
    ///
    /// Returns the activation witness on success, `None` on a wrong
    /// code.
    ///
    /// # Errors
    ///
    /// Returns an error if the proposed secret is not valid base32.
    pub fn confirm_secret(
        &self,
        proposed_secret: &str,
        code: &str,
    ) -> AuthResult<Option<ConfirmedSecret>> {
        if self
            .totp
            .verify_now(proposed_secret, code, self.config.pairing_window)?
        {
            Ok(Some(ConfirmedSecret::new(proposed_secret)))
        } else {
            Ok(None)
        }
    }

    /// The secret-rotation path: consumes the rotation nonce, confirms
    /// the proposed secret, and only then stores and activates it.
    ///
    /// Callable only for an already-authenticated identity; the gateway
    /// enforces that, since session checks are outside this core.
    ///
    /// # Errors
    ///
    /// Returns an error for backend failures or a malformed proposed
    /// secret; replayed nonces and wrong codes are rejected outcomes.
    pub async fn provision_and_activate(
        &self,
        login: &str,
        proposed_secret: &str,
        confirmation_code: &str,
        rotation_nonce: &str,
        title: &str,
        description: &str,
    ) -> AuthResult<RotationOutcome> {
        if !self
            .nonces
            .verify_and_consume(ROTATION_NONCE_PURPOSE, login, rotation_nonce)
            .await?
        {
            self.audit(&AuthEvent::rejected(
                EventType::SecretRotated,
                login,
                RejectionReason::NonceInvalid.as_str(),
            ));
            return Ok(RotationOutcome::Rejected(RejectionReason::NonceInvalid));
        }

        let Some(confirmed) = self.confirm_secret(proposed_secret, confirmation_code)? else {
            self.audit(&AuthEvent::rejected(
                EventType::SecretRotated,
                login,
                RejectionReason::CodeInvalid.as_str(),
            ));
            return Ok(RotationOutcome::Rejected(RejectionReason::CodeInvalid));
        };

        let record = self
            .activate_confirmed(login, confirmed, title, description)
            .await?;
        Ok(RotationOutcome::Activated(record))
    }

    /// Disables the second factor for a login. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn deactivate(&self, login: &str) -> AuthResult<()> {
        self.secrets.deactivate(login).await?;
        self.audit(&AuthEvent::success(EventType::SecretDeactivated, login));
        Ok(())
    }

    /// Stores and activates a confirmed secret. The [`ConfirmedSecret`]
    /// witness is the only way in: activation cannot happen without a
    /// prior successful verification of this exact secret.
    async fn activate_confirmed(
        &self,
        login: &str,
        confirmed: ConfirmedSecret,
        title: &str,
        description: &str,
    ) -> AuthResult<SecretRecord> {
        let secret = confirmed.into_secret();
        self.secrets
            .rotate_secret(login, &secret, title, description)
            .await?;
        self.audit(&AuthEvent::success(EventType::SecretRotated, login));

        self.secrets.activate(login).await?;
        self.audit(&AuthEvent::success(EventType::SecretActivated, login));

        self.secrets
            .load(login)
            .await?
            .ok_or(AuthError::InvalidState)
    }

    fn audit(&self, event: &AuthEvent) {
        match event.outcome {
            EventOutcome::Success => {
                tracing::info!(
                    event = ?event.event_type,
                    login = %event.login,
                    timestamp = %event.timestamp,
                    "auth event"
                );
            }
            EventOutcome::Rejected => {
                tracing::warn!(
                    event = ?event.event_type,
                    login = %event.login,
                    reason = event.reason.as_deref().unwrap_or("unknown"),
                    timestamp = %event.timestamp,
                    "auth event rejected"
                );
            }
        }
    }

    async fn setup_for(&self, login: &str, secret: String) -> AuthResult<ProvisioningSetup> {
        let uri = provisioning_uri(&secret, login, &self.config.issuer);
        let rotation_nonce = self.nonces.issue(ROTATION_NONCE_PURPOSE, login).await?;

        Ok(ProvisioningSetup {
            login: login.to_string(),
            secret,
            uri,
            rotation_nonce,
        })
    }
}
