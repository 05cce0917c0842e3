//! Primary-factor collaborator contract.

use async_trait::async_trait;

use crate::error::AuthResult;

/// The host application's primary-credential verifier.
///
/// This core never inspects or stores passwords; it only consumes the
/// pass/fail result of this single call. The call must be free of side
/// effects observable by this core.
#[async_trait]
pub trait PrimaryAuthenticator: Send + Sync {
    /// Verifies a primary credential (typically a password) for a login.
    async fn verify_primary_credential(&self, login: &str, credential: &str) -> AuthResult<bool>;
}
