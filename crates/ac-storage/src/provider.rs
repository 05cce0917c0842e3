//! Secret storage provider trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::record::SecretRecord;

/// Provider for secret record storage.
///
/// Implementations must be thread-safe and must persist every mutation
/// before returning: a concurrent reader observes either the pre- or the
/// post-mutation record in full, never a torn write.
///
/// ## Caller obligation
///
/// `activate` must only be called after a successful code verification
/// against the exact secret being activated. The login flow enforces
/// this with a confirmation witness; backends do not re-check it.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Loads the record for a login, if one exists.
    async fn load(&self, login: &str) -> StorageResult<Option<SecretRecord>>;

    /// Returns the existing record for a login, or creates an inactive
    /// one holding the supplied freshly generated secret.
    ///
    /// The store holds no crypto; the caller generates the secret and
    /// passes it in. When a record already exists the supplied secret is
    /// discarded.
    async fn provision_if_absent(
        &self,
        login: &str,
        fresh_secret: &str,
    ) -> StorageResult<SecretRecord>;

    /// Marks the record active.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if no record exists.
    async fn activate(&self, login: &str) -> StorageResult<()>;

    /// Marks the record inactive. Idempotent: deactivating an inactive
    /// or absent record is a no-op, not an error.
    async fn deactivate(&self, login: &str) -> StorageResult<()>;

    /// Replaces the secret material and display metadata of a record,
    /// creating the record if absent. Does not touch `active`; the
    /// caller must re-confirm and re-activate the new secret.
    async fn rotate_secret(
        &self,
        login: &str,
        new_secret: &str,
        title: &str,
        description: &str,
    ) -> StorageResult<SecretRecord>;
}
