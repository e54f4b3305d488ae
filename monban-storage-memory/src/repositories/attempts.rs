//! In-memory implementation of the attempts repository.

use std::sync::Arc;

use monban_core::{
    ATTEMPT_RECORD_KEY, AttemptRecord, SessionStore, repositories::AttemptsRepository,
};

use crate::MemorySessionStore;

/// Attempts repository backed by the in-memory session store.
///
/// The record is stored as JSON under [`ATTEMPT_RECORD_KEY`]. Anything
/// unparseable under that key reads as a fresh record; losing the counter
/// only relaxes the deterrent, so corruption is never an error.
pub struct MemoryAttemptsRepository {
    store: Arc<MemorySessionStore>,
}

impl MemoryAttemptsRepository {
    /// Create a new in-memory attempts repository.
    pub fn new(store: Arc<MemorySessionStore>) -> Self {
        Self { store }
    }
}

impl AttemptsRepository for MemoryAttemptsRepository {
    fn load(&self) -> AttemptRecord {
        match self.store.get(ATTEMPT_RECORD_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                tracing::debug!(%error, "Discarding unparseable attempt record");
                AttemptRecord::default()
            }),
            None => AttemptRecord::default(),
        }
    }

    fn save(&self, record: &AttemptRecord) {
        match serde_json::to_string(record) {
            Ok(raw) => self.store.set(ATTEMPT_RECORD_KEY, &raw),
            Err(error) => {
                tracing::warn!(%error, "Failed to serialize attempt record");
            }
        }
    }
}
