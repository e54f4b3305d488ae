//! Login flow orchestration for the admin sign-in form.
//!
//! The flow wraps the external auth provider with the pieces the provider
//! does not supply: input validation, the lockout guard, and the artificial
//! pre-response delay that slows automated guessing. Credential checking
//! itself is delegated through [`CredentialVerifier`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Error,
    error::AuthError,
    repositories::AttemptsRepository,
    services::LoginAttemptGuard,
    storage::{GuardConfig, GuardStatus},
    validation::{validate_email, validate_password},
};

/// The hosted auth provider, seen from this crate.
///
/// Credential verification, session issuance, and admin-role checks all live
/// behind this trait; the login flow only observes success or failure.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Verify credentials with the provider, establishing its session on
    /// success.
    async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Terminate the provider session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Configuration for the login flow around the guard.
#[derive(Debug, Clone)]
pub struct LoginFlowConfig {
    /// Artificial delay inserted before the auth result is acted on, to slow
    /// down automated guessing. Zero disables it.
    pub pre_response_delay: Duration,
}

impl Default for LoginFlowConfig {
    fn default() -> Self {
        Self {
            pre_response_delay: Duration::from_secs(1),
        }
    }
}

/// Service orchestrating one login submission.
///
/// Order per submission: validate input, consult the guard, apply the
/// artificial delay, call the verifier, report the outcome back to the
/// guard. A locked guard refuses the submission before the verifier is
/// reached; malformed input is rejected before either.
pub struct LoginService<R: AttemptsRepository, V: CredentialVerifier> {
    guard: LoginAttemptGuard<R>,
    verifier: Arc<V>,
    config: LoginFlowConfig,
}

impl<R: AttemptsRepository, V: CredentialVerifier> LoginService<R, V> {
    /// Create a new LoginService.
    pub fn new(
        repository: Arc<R>,
        verifier: Arc<V>,
        guard_config: GuardConfig,
        config: LoginFlowConfig,
    ) -> Self {
        Self {
            guard: LoginAttemptGuard::new(repository, guard_config),
            verifier,
            config,
        }
    }

    /// The guard backing this flow, for direct status polling.
    pub fn guard(&self) -> &LoginAttemptGuard<R> {
        &self.guard
    }

    /// Current guard state at `now`; see
    /// [`LoginAttemptGuard::check_status`].
    pub fn status(&self, now: DateTime<Utc>) -> GuardStatus {
        self.guard.check_status(now)
    }

    /// Submit credentials, `now` being the submission instant.
    ///
    /// Returns `AuthError::AccountLocked` without contacting the provider
    /// while the guard is locked, and a validation error without burning an
    /// attempt for malformed input. A failed provider response is recorded
    /// against the guard exactly once.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        validate_email(email)?;
        validate_password(password)?;

        let status = self.guard.check_status(now);
        if status.is_locked {
            tracing::warn!(
                retry_in = %status.countdown(),
                "Login refused while locked out"
            );
            return Err(AuthError::AccountLocked {
                retry_after_seconds: status.remaining_lockout_seconds,
            }
            .into());
        }

        if !self.config.pre_response_delay.is_zero() {
            tokio::time::sleep(self.config.pre_response_delay).await;
        }

        match self.verifier.verify(email, password).await {
            Ok(()) => {
                self.guard.record_success();
                tracing::debug!(email, "Admin login succeeded");
                Ok(())
            }
            Err(err) => {
                self.guard.record_failure(now);
                Err(Error::Auth(err))
            }
        }
    }

    /// Terminate the provider session.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.verifier.sign_out().await.map_err(Error::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AttemptRecord;
    use std::sync::Mutex;

    struct MockAttemptsRepository {
        record: Mutex<AttemptRecord>,
    }

    impl MockAttemptsRepository {
        fn new() -> Self {
            Self {
                record: Mutex::new(AttemptRecord::default()),
            }
        }

        fn with_record(record: AttemptRecord) -> Self {
            Self {
                record: Mutex::new(record),
            }
        }

        fn stored(&self) -> AttemptRecord {
            self.record.lock().unwrap().clone()
        }
    }

    impl AttemptsRepository for MockAttemptsRepository {
        fn load(&self) -> AttemptRecord {
            self.record.lock().unwrap().clone()
        }

        fn save(&self, record: &AttemptRecord) {
            *self.record.lock().unwrap() = record.clone();
        }
    }

    /// Mock verifier that accepts exactly one credential pair
    struct MockVerifier {
        email: String,
        password: String,
        calls: Mutex<u32>,
    }

    impl MockVerifier {
        fn new(email: &str, password: &str) -> Self {
            Self {
                email: email.to_string(),
                password: password.to_string(),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CredentialVerifier for MockVerifier {
        async fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
            *self.calls.lock().unwrap() += 1;
            if email == self.email && password == self.password {
                Ok(())
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    fn no_delay() -> LoginFlowConfig {
        LoginFlowConfig {
            pre_response_delay: Duration::ZERO,
        }
    }

    fn service(
        repo: Arc<MockAttemptsRepository>,
        verifier: Arc<MockVerifier>,
    ) -> LoginService<MockAttemptsRepository, MockVerifier> {
        LoginService::new(repo, verifier, GuardConfig::default(), no_delay())
    }

    #[tokio::test]
    async fn test_malformed_email_rejected_before_verifier() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo.clone(), verifier.clone());

        let result = svc.sign_in("not-an-email", "whatever1", t0()).await;

        assert!(result.unwrap_err().is_validation_error());
        assert_eq!(verifier.call_count(), 0);
        assert_eq!(repo.stored().count, 0);
    }

    #[tokio::test]
    async fn test_short_password_rejected_before_verifier() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo.clone(), verifier.clone());

        let result = svc.sign_in("admin@example.com", "tiny", t0()).await;

        assert!(result.unwrap_err().is_validation_error());
        assert_eq!(verifier.call_count(), 0);
        assert_eq!(repo.stored().count, 0);
    }

    #[tokio::test]
    async fn test_failed_verification_records_one_attempt() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo.clone(), verifier.clone());

        let result = svc.sign_in("admin@example.com", "wrong-guess", t0()).await;

        match result.unwrap_err() {
            Error::Auth(AuthError::InvalidCredentials) => {}
            e => panic!("Expected AuthError::InvalidCredentials, got {e:?}"),
        }
        assert_eq!(verifier.call_count(), 1);
        assert_eq!(repo.stored().count, 1);
    }

    #[tokio::test]
    async fn test_successful_login_resets_counter() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo.clone(), verifier);

        svc.sign_in("admin@example.com", "wrong-guess", t0())
            .await
            .unwrap_err();
        svc.sign_in("admin@example.com", "wrong-again", t0())
            .await
            .unwrap_err();
        assert_eq!(repo.stored().count, 2);

        svc.sign_in("admin@example.com", "correct-horse", t0())
            .await
            .unwrap();
        assert_eq!(repo.stored(), AttemptRecord::default());
    }

    #[tokio::test]
    async fn test_locked_guard_short_circuits_the_verifier() {
        let locked_until = t0().timestamp_millis() + 600_000;
        let repo = Arc::new(MockAttemptsRepository::with_record(AttemptRecord {
            count: 5,
            last_attempt: t0().timestamp_millis(),
            locked_until: Some(locked_until),
        }));
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo, verifier.clone());

        // Even the right password is refused while locked
        let result = svc
            .sign_in("admin@example.com", "correct-horse", t0())
            .await;

        match result.unwrap_err() {
            Error::Auth(AuthError::AccountLocked {
                retry_after_seconds,
            }) => assert_eq!(retry_after_seconds, 600),
            e => panic!("Expected AuthError::AccountLocked, got {e:?}"),
        }
        assert_eq!(verifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fifth_failure_locks_subsequent_submissions() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo.clone(), verifier.clone());

        for _ in 0..5 {
            svc.sign_in("admin@example.com", "wrong-guess", t0())
                .await
                .unwrap_err();
        }
        assert_eq!(verifier.call_count(), 5);

        let result = svc.sign_in("admin@example.com", "wrong-guess", t0()).await;
        assert!(result.unwrap_err().is_locked_out());
        assert_eq!(verifier.call_count(), 5);
    }

    #[tokio::test]
    async fn test_status_reports_through_the_flow() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo, verifier);

        assert_eq!(svc.status(t0()).attempts_remaining, 5);
        svc.sign_in("admin@example.com", "wrong-guess", t0())
            .await
            .unwrap_err();
        assert_eq!(svc.status(t0()).attempts_remaining, 4);
    }

    #[tokio::test]
    async fn test_sign_out_delegates_to_the_verifier() {
        let repo = Arc::new(MockAttemptsRepository::new());
        let verifier = Arc::new(MockVerifier::new("admin@example.com", "correct-horse"));
        let svc = service(repo, verifier);

        assert!(svc.sign_out().await.is_ok());
    }
}
