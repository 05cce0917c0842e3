//! # ac-storage
//!
//! Per-user secret records and the storage provider contract.
//!
//! One [`SecretRecord`] exists per login identity. The [`SecretStore`]
//! trait is the seam where a real backend (SQL, key-value, ...) plugs in;
//! [`MemorySecretStore`] is the reference implementation used by the
//! flows and their tests.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod memory;
pub mod provider;
pub mod record;

pub use error::{StorageError, StorageResult};
pub use memory::MemorySecretStore;
pub use provider::SecretStore;
pub use record::SecretRecord;
