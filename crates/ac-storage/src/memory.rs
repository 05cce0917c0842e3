//! In-memory secret store.
//!
//! Reference backend used by the login flows and their tests. All
//! mutations run under the write lock, so readers never observe a
//! half-updated record.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::provider::SecretStore;
use crate::record::SecretRecord;

/// Thread-safe in-memory implementation of [`SecretStore`].
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    records: RwLock<HashMap<String, SecretRecord>>,
}

impl MemorySecretStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn load(&self, login: &str) -> StorageResult<Option<SecretRecord>> {
        Ok(self.records.read().await.get(login).cloned())
    }

    async fn provision_if_absent(
        &self,
        login: &str,
        fresh_secret: &str,
    ) -> StorageResult<SecretRecord> {
        let mut records = self.records.write().await;
        let record = records
            .entry(login.to_string())
            .or_insert_with(|| SecretRecord::new(login, fresh_secret));
        Ok(record.clone())
    }

    async fn activate(&self, login: &str) -> StorageResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(login).ok_or_else(|| StorageError::NotFound {
            login: login.to_string(),
        })?;
        record.active = true;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn deactivate(&self, login: &str) -> StorageResult<()> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(login) {
            record.active = false;
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rotate_secret(
        &self,
        login: &str,
        new_secret: &str,
        title: &str,
        description: &str,
    ) -> StorageResult<SecretRecord> {
        let mut records = self.records.write().await;
        let record = records
            .entry(login.to_string())
            .or_insert_with(|| SecretRecord::new(login, new_secret));
        record.secret = new_secret.to_string();
        record.title = title.to_string();
        record.description = description.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_on_empty_store_is_none() {
        let store = MemorySecretStore::new();
        assert!(store.load("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn provision_creates_inactive_record_once() {
        let store = MemorySecretStore::new();

        let first = store.provision_if_absent("alice", "SECRETONE0").await.unwrap();
        assert!(!first.active);
        assert_eq!(first.secret, "SECRETONE0");

        // A second provisioning attempt keeps the original secret.
        let second = store.provision_if_absent("alice", "SECRETTWO0").await.unwrap();
        assert_eq!(second.secret, "SECRETONE0");
    }

    #[tokio::test]
    async fn activate_flips_flag_and_requires_record() {
        let store = MemorySecretStore::new();
        store.provision_if_absent("alice", "SECRETONE0").await.unwrap();

        store.activate("alice").await.unwrap();
        assert!(store.load("alice").await.unwrap().unwrap().active);

        let err = store.activate("nobody").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn deactivate_is_idempotent() {
        let store = MemorySecretStore::new();
        store.provision_if_absent("alice", "SECRETONE0").await.unwrap();
        store.activate("alice").await.unwrap();

        store.deactivate("alice").await.unwrap();
        store.deactivate("alice").await.unwrap();
        assert!(!store.load("alice").await.unwrap().unwrap().active);

        // Absent records are a no-op as well.
        store.deactivate("nobody").await.unwrap();
    }

    #[tokio::test]
    async fn rotate_replaces_material_but_not_active_flag() {
        let store = MemorySecretStore::new();
        store.provision_if_absent("alice", "SECRETONE0").await.unwrap();
        store.activate("alice").await.unwrap();

        let rotated = store
            .rotate_secret("alice", "SECRETTWO0", "Phone", "Backup device")
            .await
            .unwrap();

        assert_eq!(rotated.secret, "SECRETTWO0");
        assert_eq!(rotated.title, "Phone");
        assert_eq!(rotated.description, "Backup device");
        // Rotation leaves the flag exactly as it was.
        assert!(rotated.active);
    }

    #[tokio::test]
    async fn rotate_creates_record_if_absent() {
        let store = MemorySecretStore::new();
        let record = store
            .rotate_secret("bob", "SECRETONE0", "", "")
            .await
            .unwrap();
        assert!(!record.active);
        assert_eq!(record.secret, "SECRETONE0");
    }
}
