//! # ac-core
//!
//! Configuration and audit event model for the authcode second-factor
//! core. The other `ac-*` crates build on the types defined here.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod event;

pub use config::TwoFactorConfig;
pub use event::{AuthEvent, EventOutcome, EventType};
