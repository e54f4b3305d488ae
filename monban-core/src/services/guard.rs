//! Brute-force lockout guard for the admin login form.
//!
//! This module implements session-scoped login attempt tracking with
//! automatic lockout after a fixed number of consecutive failures.
//!
//! # Features
//!
//! - Per-session failed attempt tracking
//! - Automatic lockout after 5 consecutive failures
//! - Self-expiring 15 minute lockout window
//! - Remaining-attempts / remaining-lockout-time state for UI display
//!
//! The guard is a deterrent, not an enforcement point: the counter lives in
//! session-scoped storage and resets with the session context. Server-side
//! rate limiting is the auth provider's responsibility.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use monban_core::services::LoginAttemptGuard;
//! use monban_core::storage::GuardConfig;
//!
//! let guard = LoginAttemptGuard::new(repository, GuardConfig::default());
//!
//! // Check before submitting to the auth provider
//! let status = guard.check_status(Utc::now());
//! if status.is_locked {
//!     // Refuse the submission and show status.countdown()
//! }
//!
//! // Report the outcome afterwards
//! guard.record_failure(Utc::now());
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    repositories::AttemptsRepository,
    storage::{AttemptRecord, GuardConfig, GuardStatus},
};

/// Tracks failed login attempts and decides whether an attempt is permitted.
///
/// The guard cycles between two states for the lifetime of the session:
/// open (fewer than `max_attempts` consecutive failures) and locked
/// (a lockout window is in the future). A successful login or a naturally
/// expired window resets it to open with a zeroed counter.
///
/// All operations take the current instant explicitly so callers drive the
/// clock; nothing here reads ambient time.
pub struct LoginAttemptGuard<R: AttemptsRepository> {
    repository: Arc<R>,
    config: GuardConfig,
}

impl<R: AttemptsRepository> LoginAttemptGuard<R> {
    /// Create a new LoginAttemptGuard.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository holding the session's attempt record
    /// * `config` - Configuration for lockout behavior
    pub fn new(repository: Arc<R>, config: GuardConfig) -> Self {
        Self { repository, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Compute the guard's state at `now`.
    ///
    /// Intended to be polled once per second by the presentation layer to
    /// drive a live countdown. Idempotent between ticks, with one exception:
    /// the first call after the lockout window closes resets the stored
    /// record. No other side effects.
    pub fn check_status(&self, now: DateTime<Utc>) -> GuardStatus {
        let record = self.repository.load();
        let now_ms = now.timestamp_millis();

        match record.locked_until {
            Some(until) if until > now_ms => GuardStatus {
                is_locked: true,
                // Round up so the countdown never shows 0:00 while locked
                remaining_lockout_seconds: (until - now_ms + 999) / 1000,
                attempts_remaining: 0,
            },
            Some(_) => {
                self.repository.save(&AttemptRecord::default());
                tracing::info!("Lockout window expired, attempt counter reset");
                GuardStatus {
                    is_locked: false,
                    remaining_lockout_seconds: 0,
                    attempts_remaining: self.config.max_attempts,
                }
            }
            None => GuardStatus {
                is_locked: false,
                remaining_lockout_seconds: 0,
                attempts_remaining: self.config.max_attempts.saturating_sub(record.count),
            },
        }
    }

    /// Record a failed login attempt at `now`.
    ///
    /// Increments the counter; once it reaches `max_attempts` the lockout
    /// window opens (or extends) to `now + lockout_duration`. Call exactly
    /// once per failed authentication response, never speculatively.
    pub fn record_failure(&self, now: DateTime<Utc>) {
        let record = self.repository.load();
        let now_ms = now.timestamp_millis();
        let new_count = record.count + 1;

        if new_count >= self.config.max_attempts {
            let locked_until = now_ms + self.config.lockout_duration.num_milliseconds();
            self.repository.save(&AttemptRecord {
                count: new_count,
                last_attempt: now_ms,
                locked_until: Some(locked_until),
            });
            tracing::warn!(
                count = new_count,
                locked_until_ms = locked_until,
                "Failed login attempt threshold reached, lockout engaged"
            );
        } else {
            self.repository.save(&AttemptRecord {
                count: new_count,
                last_attempt: now_ms,
                locked_until: None,
            });
            tracing::warn!(
                count = new_count,
                remaining = self.config.max_attempts - new_count,
                "Failed login attempt recorded"
            );
        }
    }

    /// Reset the guard after a successful login.
    ///
    /// Unconditionally zeroes the counter and clears any lockout window.
    pub fn record_success(&self) {
        self.repository.save(&AttemptRecord::default());
        tracing::info!("Login succeeded, attempt counter reset");
    }
}
