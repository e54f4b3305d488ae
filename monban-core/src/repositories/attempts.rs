//! Repository trait for the login attempt record.

use crate::storage::AttemptRecord;

/// Repository for the session-scoped attempt record.
///
/// Unlike a server-side attempt log, this holds exactly one record for the
/// whole session context, overwritten in place on every mutation. Both
/// operations are synchronous and infallible: the backing store is local and
/// always available, and a record that fails to read is indistinguishable
/// from no record at all.
///
/// # Security Considerations
///
/// Losing or clearing the record only relaxes the deterrent. The guard built
/// on top of this repository is a UX layer, not a security boundary; real
/// brute-force enforcement has to live server-side.
pub trait AttemptsRepository: Send + Sync + 'static {
    /// Load the current attempt record.
    ///
    /// Returns the default record when nothing is stored or when the stored
    /// data fails to parse. Never surfaces an error.
    fn load(&self) -> AttemptRecord;

    /// Overwrite the stored attempt record.
    fn save(&self, record: &AttemptRecord);
}
