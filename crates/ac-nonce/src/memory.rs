//! In-memory nonce guard.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::distr::{Alphanumeric, SampleString};
use tokio::sync::RwLock;

use crate::error::NonceResult;
use crate::guard::NonceGuard;

/// Length of issued token values. 32 alphanumeric characters is roughly
/// 190 bits of entropy, comfortably unguessable.
const TOKEN_LEN: usize = 32;

/// Default token lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug)]
struct IssuedNonce {
    value: String,
    issued_at: Instant,
}

/// Thread-safe in-memory implementation of [`NonceGuard`].
///
/// Each `(purpose, scope)` slot holds at most one live token. The whole
/// verify path runs under one write lock, so two racing consumers of the
/// same token see exactly one success.
#[derive(Debug)]
pub struct MemoryNonceGuard {
    ttl: Duration,
    slots: RwLock<HashMap<(String, String), IssuedNonce>>,
}

impl MemoryNonceGuard {
    /// Creates a guard with the default one-hour TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a guard with an explicit token lifetime.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryNonceGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NonceGuard for MemoryNonceGuard {
    async fn issue(&self, purpose: &str, scope: &str) -> NonceResult<String> {
        let value = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LEN);

        let mut slots = self.slots.write().await;
        slots.insert(
            (purpose.to_string(), scope.to_string()),
            IssuedNonce {
                value: value.clone(),
                issued_at: Instant::now(),
            },
        );

        Ok(value)
    }

    async fn verify_and_consume(
        &self,
        purpose: &str,
        scope: &str,
        token: &str,
    ) -> NonceResult<bool> {
        let key = (purpose.to_string(), scope.to_string());

        let mut slots = self.slots.write().await;
        let matched = slots
            .get(&key)
            .is_some_and(|issued| constant_time_eq(issued.value.as_bytes(), token.as_bytes()));

        if !matched {
            // A wrong guess must not void the live token for the slot.
            return Ok(false);
        }

        // Matched: consumed from here on, even if it turns out expired.
        Ok(slots
            .remove(&key)
            .is_some_and(|issued| issued.issued_at.elapsed() <= self.ttl))
    }

    async fn purge_expired(&self) -> NonceResult<u64> {
        let mut slots = self.slots.write().await;
        let before = slots.len();
        let ttl = self.ttl;
        slots.retain(|_, issued| issued.issued_at.elapsed() <= ttl);
        Ok((before - slots.len()) as u64)
    }
}

/// Constant-time comparison of two byte slices.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issued_token_verifies_exactly_once() {
        let guard = MemoryNonceGuard::new();
        let token = guard.issue("login", "alice").await.unwrap();

        assert!(guard.verify_and_consume("login", "alice", &token).await.unwrap());
        // Replay: the slot was consumed by the first verification.
        assert!(!guard.verify_and_consume("login", "alice", &token).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_value_does_not_consume_live_token() {
        let guard = MemoryNonceGuard::new();
        let token = guard.issue("login", "alice").await.unwrap();

        assert!(!guard
            .verify_and_consume("login", "alice", "nottherighttokenvalue0000000000a")
            .await
            .unwrap());
        // The real token is still live after the bad guess.
        assert!(guard.verify_and_consume("login", "alice", &token).await.unwrap());
    }

    #[tokio::test]
    async fn slots_are_scoped_by_purpose_and_scope() {
        let guard = MemoryNonceGuard::new();
        let login_token = guard.issue("login", "alice").await.unwrap();
        let save_token = guard.issue("save-authcode", "alice").await.unwrap();
        let other_user = guard.issue("login", "bob").await.unwrap();

        // A token only verifies in its own slot.
        assert!(!guard
            .verify_and_consume("save-authcode", "alice", &login_token)
            .await
            .unwrap());
        assert!(!guard.verify_and_consume("login", "bob", &login_token).await.unwrap());

        assert!(guard.verify_and_consume("login", "alice", &login_token).await.unwrap());
        assert!(guard
            .verify_and_consume("save-authcode", "alice", &save_token)
            .await
            .unwrap());
        assert!(guard.verify_and_consume("login", "bob", &other_user).await.unwrap());
    }

    #[tokio::test]
    async fn reissue_invalidates_the_previous_token() {
        let guard = MemoryNonceGuard::new();
        let stale = guard.issue("login", "alice").await.unwrap();
        let fresh = guard.issue("login", "alice").await.unwrap();
        assert_ne!(stale, fresh);

        assert!(!guard.verify_and_consume("login", "alice", &stale).await.unwrap());
        assert!(guard.verify_and_consume("login", "alice", &fresh).await.unwrap());
    }

    #[tokio::test]
    async fn expired_token_fails_and_is_consumed() {
        let guard = MemoryNonceGuard::with_ttl(Duration::ZERO);
        let token = guard.issue("login", "alice").await.unwrap();

        assert!(!guard.verify_and_consume("login", "alice", &token).await.unwrap());
        // The expired token was still consumed by the matching attempt.
        assert!(!guard.verify_and_consume("login", "alice", &token).await.unwrap());
    }

    #[tokio::test]
    async fn purge_drops_only_expired_slots() {
        let guard = MemoryNonceGuard::with_ttl(Duration::from_secs(3600));
        guard.issue("login", "alice").await.unwrap();
        assert_eq!(guard.purge_expired().await.unwrap(), 0);

        let expiring = MemoryNonceGuard::with_ttl(Duration::ZERO);
        expiring.issue("login", "alice").await.unwrap();
        expiring.issue("login", "bob").await.unwrap();
        assert_eq!(expiring.purge_expired().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn concurrent_consumers_see_one_success() {
        use std::sync::Arc;

        let guard = Arc::new(MemoryNonceGuard::new());
        let token = guard.issue("login", "alice").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = Arc::clone(&guard);
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                guard.verify_and_consume("login", "alice", &token).await.unwrap()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
