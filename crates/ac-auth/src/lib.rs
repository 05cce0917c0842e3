//! # ac-auth
//!
//! Login flow state machine and second-factor orchestration.
//!
//! This crate sequences the external primary-factor check, the per-user
//! secret store, the one-time-code engine, and the form nonce guard into
//! single [`LoginDecision`]s. Rejections carry typed reasons for audit
//! while presenting one generic user-facing message.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ac_auth::LoginService;
//! use ac_core::TwoFactorConfig;
//! use ac_nonce::MemoryNonceGuard;
//! use ac_storage::MemorySecretStore;
//!
//! let service = LoginService::new(
//!     TwoFactorConfig::new("Example"),
//!     Arc::new(my_password_checker),
//!     Arc::new(MemorySecretStore::new()),
//!     Arc::new(MemoryNonceGuard::new()),
//! );
//!
//! let decision = service.submit_primary("alice", "hunter2").await?;
//! if decision.second_factor_required {
//!     let nonce = service.issue_login_nonce("alice").await?;
//!     // render the code form carrying `nonce`...
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod confirm;
pub mod decision;
pub mod error;
pub mod flow;
pub mod login;
pub mod primary;

pub use confirm::ConfirmedSecret;
pub use decision::{LoginDecision, RejectionReason};
pub use error::{AuthError, AuthResult};
pub use flow::{states, LoginFlow, PrimaryOutcome};
pub use login::{
    LoginService, ProvisioningSetup, RotationOutcome, LOGIN_NONCE_PURPOSE, ROTATION_NONCE_PURPOSE,
};
pub use primary::PrimaryAuthenticator;
