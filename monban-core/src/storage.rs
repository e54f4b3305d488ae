//! Data types and the session-scoped storage primitive.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed key under which the attempt record is stored.
///
/// There is one record per session context; attempts are not keyed by user
/// or network origin because no server is involved.
pub const ATTEMPT_RECORD_KEY: &str = "admin_login_attempts";

/// Failed-attempt counter state for one session context.
///
/// Serialized as JSON with camelCase keys, the wire form the admin login
/// form stores in its session-scoped storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    /// Consecutive failed attempts since the last successful login or
    /// lockout expiry.
    pub count: u32,
    /// Unix-millisecond timestamp of the most recent failed attempt, `0`
    /// when unset.
    pub last_attempt: i64,
    /// Unix-millisecond instant until which login is blocked. Non-null only
    /// while `count` has reached the configured maximum.
    pub locked_until: Option<i64>,
}

impl AttemptRecord {
    /// Whether the record holds a lockout window that is still open at `now`.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until
            .is_some_and(|until| until > now.timestamp_millis())
    }
}

/// Configuration for lockout behavior.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Failed attempts tolerated before a lockout engages.
    pub max_attempts: u32,
    /// Length of the lockout window once engaged.
    pub lockout_duration: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_duration: Duration::minutes(15),
        }
    }
}

/// Snapshot of the guard's state, suitable for driving a login form.
///
/// Designed to be polled once per second for a live countdown; see
/// [`LoginAttemptGuard::check_status`](crate::services::LoginAttemptGuard::check_status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardStatus {
    /// Whether login attempts are currently refused.
    pub is_locked: bool,
    /// Whole seconds until the lockout window closes, `0` when unlocked.
    /// Rounded up so the countdown never reads `0:00` while still locked.
    pub remaining_lockout_seconds: i64,
    /// Attempts left before a lockout engages, `0` while locked.
    pub attempts_remaining: u32,
}

impl GuardStatus {
    /// Format the remaining lockout time as `M:SS` (e.g. `14:59`) for
    /// countdown display.
    pub fn countdown(&self) -> String {
        let mins = self.remaining_lockout_seconds / 60;
        let secs = self.remaining_lockout_seconds % 60;
        format!("{mins}:{secs:02}")
    }
}

/// Synchronous session-scoped string store.
///
/// This is the seam to the ambient storage context the attempt record lives
/// in. It is local and always available: reads and writes cannot fail, and
/// the stored data vanishes with the session context itself.
pub trait SessionStore: Send + Sync + 'static {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
}
