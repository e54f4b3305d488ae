//! Builder pattern for constructing Monban instances
//!
//! This module provides a type-safe builder for creating [`Monban`]
//! instances with compile-time validation that a credential verifier has
//! been supplied.
//!
//! # Example
//!
//! ```rust,ignore
//! use monban::MonbanBuilder;
//! use std::sync::Arc;
//!
//! let monban = MonbanBuilder::new()
//!     .with_verifier(Arc::new(my_verifier))
//!     .with_max_attempts(3)
//!     .build_with_memory()?;
//! ```

use std::sync::Arc;

use chrono::Duration;
use monban_core::{
    CredentialVerifier, GuardConfig,
    repositories::AttemptsRepositoryProvider,
    services::LoginFlowConfig,
};

use crate::Monban;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when building a Monban instance.
#[derive(Debug, thiserror::Error)]
pub enum MonbanBuilderError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// ============================================================================
// Type-State Markers
// ============================================================================

/// Marker type indicating no credential verifier has been configured yet.
///
/// This is the initial state of [`MonbanBuilder`].
pub struct NoVerifier;

/// Marker type indicating a credential verifier has been configured.
pub struct WithVerifier<V: CredentialVerifier> {
    verifier: Arc<V>,
}

// ============================================================================
// Builder Implementation
// ============================================================================

/// A type-safe builder for constructing [`Monban`] instances.
///
/// The builder uses a type-state pattern to ensure a credential verifier is
/// supplied before building; configuration knobs are available in either
/// state.
pub struct MonbanBuilder<Verifier> {
    verifier: Verifier,
    guard_config: GuardConfig,
    flow_config: LoginFlowConfig,
}

impl MonbanBuilder<NoVerifier> {
    /// Create a new builder with default guard and flow configuration.
    pub fn new() -> Self {
        Self {
            verifier: NoVerifier,
            guard_config: GuardConfig::default(),
            flow_config: LoginFlowConfig::default(),
        }
    }

    /// Supply the credential verifier (the external auth provider).
    pub fn with_verifier<V: CredentialVerifier>(
        self,
        verifier: Arc<V>,
    ) -> MonbanBuilder<WithVerifier<V>> {
        MonbanBuilder {
            verifier: WithVerifier { verifier },
            guard_config: self.guard_config,
            flow_config: self.flow_config,
        }
    }
}

impl Default for MonbanBuilder<NoVerifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Verifier> MonbanBuilder<Verifier> {
    /// Replace the guard configuration wholesale.
    pub fn with_guard_config(mut self, config: GuardConfig) -> Self {
        self.guard_config = config;
        self
    }

    /// Failed attempts tolerated before a lockout engages.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.guard_config.max_attempts = max_attempts;
        self
    }

    /// Length of the lockout window once engaged.
    pub fn with_lockout_duration(mut self, duration: Duration) -> Self {
        self.guard_config.lockout_duration = duration;
        self
    }

    /// Artificial delay inserted before each auth result is acted on.
    pub fn with_pre_response_delay(mut self, delay: std::time::Duration) -> Self {
        self.flow_config.pre_response_delay = delay;
        self
    }

    fn validate(&self) -> Result<(), MonbanBuilderError> {
        if self.guard_config.max_attempts == 0 {
            return Err(MonbanBuilderError::InvalidConfiguration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.guard_config.lockout_duration <= Duration::zero() {
            return Err(MonbanBuilderError::InvalidConfiguration(
                "lockout_duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl<V: CredentialVerifier> MonbanBuilder<WithVerifier<V>> {
    /// Build against an explicit repository provider.
    pub fn build_with<P: AttemptsRepositoryProvider>(
        self,
        repositories: Arc<P>,
    ) -> Result<Monban<P, V>, MonbanBuilderError> {
        self.validate()?;
        Ok(Monban::with_config(
            repositories,
            self.verifier.verifier,
            self.guard_config,
            self.flow_config,
        ))
    }

    /// Build against a fresh in-memory session store.
    #[cfg(feature = "memory")]
    pub fn build_with_memory(
        self,
    ) -> Result<Monban<monban_storage_memory::MemoryRepositoryProvider, V>, MonbanBuilderError>
    {
        self.build_with(Arc::new(
            monban_storage_memory::MemoryRepositoryProvider::default(),
        ))
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use monban_core::error::AuthError;

    struct RejectAll;

    #[async_trait]
    impl CredentialVerifier for RejectAll {
        async fn verify(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
            Err(AuthError::InvalidCredentials)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let monban = MonbanBuilder::new()
            .with_verifier(Arc::new(RejectAll))
            .build_with_memory()
            .expect("defaults are valid");

        assert_eq!(monban.guard().config().max_attempts, 5);
        assert_eq!(
            monban.guard().config().lockout_duration,
            Duration::minutes(15)
        );
    }

    #[test]
    fn test_build_rejects_zero_max_attempts() {
        let result = MonbanBuilder::new()
            .with_verifier(Arc::new(RejectAll))
            .with_max_attempts(0)
            .build_with_memory();

        assert!(matches!(
            result,
            Err(MonbanBuilderError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_build_rejects_non_positive_lockout() {
        let result = MonbanBuilder::new()
            .with_verifier(Arc::new(RejectAll))
            .with_lockout_duration(Duration::zero())
            .build_with_memory();

        assert!(matches!(
            result,
            Err(MonbanBuilderError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_knobs_apply_in_either_state() {
        let monban = MonbanBuilder::new()
            .with_max_attempts(3)
            .with_verifier(Arc::new(RejectAll))
            .with_lockout_duration(Duration::minutes(5))
            .build_with_memory()
            .expect("configuration is valid");

        assert_eq!(monban.guard().config().max_attempts, 3);
        assert_eq!(
            monban.guard().config().lockout_duration,
            Duration::minutes(5)
        );
    }
}
