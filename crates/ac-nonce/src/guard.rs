//! Nonce guard provider trait.

use async_trait::async_trait;

use crate::error::NonceResult;

/// Provider for single-use form nonces.
///
/// Implementations must be thread-safe, and a race between two
/// `verify_and_consume` calls on the same token must yield at most one
/// success; the loser observes an already-consumed slot.
#[async_trait]
pub trait NonceGuard: Send + Sync {
    /// Issues a fresh token for `(purpose, scope)`, overwriting any prior
    /// live token for that slot. Only the most recently issued token is
    /// valid, which deliberately invalidates stale forms on re-render.
    async fn issue(&self, purpose: &str, scope: &str) -> NonceResult<String>;

    /// Verifies and consumes a submitted token.
    ///
    /// Returns `true` iff a live, unexpired token exists for the slot and
    /// the submitted value matches it exactly. A matching token is
    /// removed whether or not it had already expired: used once, gone.
    /// A non-matching submission leaves the live token in place, so a
    /// third party cannot void someone else's pending form by guessing.
    async fn verify_and_consume(
        &self,
        purpose: &str,
        scope: &str,
        token: &str,
    ) -> NonceResult<bool>;

    /// Drops expired tokens. Housekeeping for long-lived in-process
    /// guards; distributed backends with native TTLs may make this a
    /// no-op.
    async fn purge_expired(&self) -> NonceResult<u64>;
}
