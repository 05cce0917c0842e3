//! Secret record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The second-factor secret record for one user.
///
/// A record is created inactive at provisioning time and only becomes
/// active after the user proves possession of the secret with a correct
/// code. An active record must therefore always hold a confirmed,
/// non-empty secret.
///
/// ## Security Note
///
/// The `secret` field is shared key material. Implementations should
/// encrypt it at rest and must never log it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Login identity this record belongs to (unique per user).
    pub login: String,
    /// Base32-encoded shared secret.
    pub secret: String,
    /// Display title (e.g. shown above the QR code at pairing time).
    pub title: String,
    /// Display description.
    pub description: String,
    /// Whether the second factor is required at login.
    pub active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl SecretRecord {
    /// Creates a new, inactive record for a freshly generated secret.
    #[must_use]
    pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            login: login.into(),
            secret: secret.into(),
            title: String::new(),
            description: String::new(),
            active: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the display description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks whether a login must present a second factor.
    #[must_use]
    pub fn requires_second_factor(&self) -> bool {
        self.active && !self.secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_start_inactive() {
        let record = SecretRecord::new("alice", "GEZDGNBVGY3TQOJQ");
        assert!(!record.active);
        assert!(!record.requires_second_factor());
    }

    #[test]
    fn active_record_with_secret_requires_second_factor() {
        let mut record = SecretRecord::new("alice", "GEZDGNBVGY3TQOJQ");
        record.active = true;
        assert!(record.requires_second_factor());
    }

    #[test]
    fn builder_sets_metadata() {
        let record = SecretRecord::new("alice", "GEZDGNBVGY3TQOJQ")
            .with_title("Work laptop")
            .with_description("Authenticator on the office phone");
        assert_eq!(record.title, "Work laptop");
        assert_eq!(record.description, "Authenticator on the office phone");
    }

    #[test]
    fn record_serializes_external_shape() {
        let record = SecretRecord::new("alice", "GEZDGNBVGY3TQOJQ");
        let json = serde_json::to_string(&record).unwrap();
        for field in ["\"login\"", "\"secret\"", "\"title\"", "\"description\"", "\"active\""] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }
}
