//! Core functionality for the monban project
//!
//! This module contains the data types, repository traits, and services for
//! the admin login lockout guard: the attempt record, the guard state
//! machine, credential validation, and the login flow around the external
//! auth provider.
//!
//! The core module is designed to be used as a dependency for storage
//! backends and the `monban` facade, and is not intended to be used directly
//! by application code.
//!
//! See [`services::LoginAttemptGuard`] for the guard itself and
//! [`services::LoginService`] for the flow that drives it.

pub mod error;
pub mod repositories;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::Error;
pub use services::{CredentialVerifier, LoginAttemptGuard, LoginService};
pub use storage::{ATTEMPT_RECORD_KEY, AttemptRecord, GuardConfig, GuardStatus, SessionStore};
