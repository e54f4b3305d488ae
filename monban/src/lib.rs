//! # Monban
//!
//! Monban is a small brute-force lockout guard for admin login forms. It
//! tracks failed sign-in attempts within one session context, refuses
//! further attempts for a fixed window once a threshold is reached, and
//! exposes remaining-attempts / remaining-lockout-time state so a form can
//! render a live countdown.
//!
//! Credential verification itself stays with your auth provider: Monban
//! wraps it through the [`CredentialVerifier`] trait and only observes
//! success or failure. What it adds around the provider:
//!
//! - Input validation (email shape, minimum password length) that never
//!   burns an attempt
//! - A 5-attempt counter with a self-expiring 15 minute lockout window
//! - An artificial pre-response delay to slow automated guessing
//!
//! ## Warning
//!
//! The counter is scoped to one session context and is trivially discarded
//! with it. Monban is a UX deterrent, not a security boundary — true
//! brute-force enforcement must live server-side, keyed by account and/or
//! network origin.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use monban::MonbanBuilder;
//! use std::sync::Arc;
//!
//! let monban = MonbanBuilder::new()
//!     .with_verifier(Arc::new(my_verifier))
//!     .build_with_memory()?;
//!
//! match monban.sign_in("admin@example.com", "password", Utc::now()).await {
//!     Ok(()) => { /* navigate into the admin panel */ }
//!     Err(e) if e.is_locked_out() => {
//!         let status = monban.check_status(Utc::now());
//!         println!("Locked. Try again in {}", status.countdown());
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use monban_core::{
    repositories::AttemptsRepositoryProvider,
    services::{LoginAttemptGuard, LoginService},
};

pub mod builder;

pub use builder::{MonbanBuilder, MonbanBuilderError, NoVerifier, WithVerifier};

/// Re-export core types from monban_core
///
/// These types are commonly used when working with the Monban API.
pub use monban_core::{
    ATTEMPT_RECORD_KEY, AttemptRecord, CredentialVerifier, Error, GuardConfig, GuardStatus,
    SessionStore,
    error::{AuthError, ValidationError},
    services::LoginFlowConfig,
    validation::{validate_email, validate_password},
};

/// Re-export storage backends
///
/// These storage implementations are available when the corresponding feature is enabled.
#[cfg(feature = "memory")]
pub use monban_storage_memory::{
    MemoryAttemptsRepository, MemoryRepositoryProvider, MemorySessionStore,
};

/// The main entry point, wiring a storage backend and a credential verifier
/// to the lockout guard and the login flow.
///
/// Construct one per login form, typically through [`MonbanBuilder`].
pub struct Monban<P: AttemptsRepositoryProvider, V: CredentialVerifier> {
    login: LoginService<P::AttemptsRepo, V>,
}

impl<P: AttemptsRepositoryProvider, V: CredentialVerifier> Monban<P, V> {
    /// Create a Monban instance with default guard and flow configuration
    /// (5 attempts, 15 minute lockout, 1 second pre-response delay).
    pub fn new(repositories: Arc<P>, verifier: Arc<V>) -> Self {
        Self::with_config(
            repositories,
            verifier,
            GuardConfig::default(),
            LoginFlowConfig::default(),
        )
    }

    /// Create a Monban instance with explicit configuration.
    pub fn with_config(
        repositories: Arc<P>,
        verifier: Arc<V>,
        guard_config: GuardConfig,
        flow_config: LoginFlowConfig,
    ) -> Self {
        Self {
            login: LoginService::new(
                repositories.attempts(),
                verifier,
                guard_config,
                flow_config,
            ),
        }
    }

    /// The guard backing this instance, for the full attempt-tracking
    /// contract (`check_status` / `record_failure` / `record_success`).
    pub fn guard(&self) -> &LoginAttemptGuard<P::AttemptsRepo> {
        self.login.guard()
    }

    /// Guard state at `now`. Poll once per second for a live countdown.
    pub fn check_status(&self, now: DateTime<Utc>) -> GuardStatus {
        self.login.status(now)
    }

    /// Submit credentials, `now` being the submission instant.
    ///
    /// See [`monban_core::services::LoginService::sign_in`] for the flow.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        self.login.sign_in(email, password, now).await
    }

    /// Terminate the provider session.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.login.sign_out().await
    }
}
