//! Service layer for business logic
//!
//! This module contains the lockout guard itself and the login flow that
//! consults it around the external auth provider.

pub mod guard;
pub mod login;

pub use guard::LoginAttemptGuard;
pub use login::{CredentialVerifier, LoginFlowConfig, LoginService};
