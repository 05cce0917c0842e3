//! Secret-confirmation witness.

/// Proof that a user demonstrated possession of a specific secret.
///
/// A value of this type is only ever produced by
/// [`LoginService::confirm_secret`](crate::LoginService::confirm_secret)
/// after a code computed from that exact secret verified. Activation
/// consumes the witness, which makes "activate an unconfirmed secret"
/// unrepresentable rather than merely discouraged.
#[derive(Debug)]
pub struct ConfirmedSecret {
    secret: String,
}

impl ConfirmedSecret {
    pub(crate) fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// The confirmed base32 secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub(crate) fn into_secret(self) -> String {
        self.secret
    }
}
