//! # ac-nonce
//!
//! Single-use tokens protecting state-changing form submissions from
//! replay and CSRF. A token is keyed by `(purpose, scope)`, e.g.
//! `("login", <session>)`, and holds one live value at a time, expires
//! after a TTL, and is consumed by its first matching verification.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod guard;
pub mod memory;

pub use error::{NonceError, NonceResult};
pub use guard::NonceGuard;
pub use memory::MemoryNonceGuard;
