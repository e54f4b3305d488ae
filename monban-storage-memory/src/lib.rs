//! Session-scoped in-memory storage for the monban login guard.
//!
//! This crate is the counterpart of a browser's tab-local `sessionStorage`
//! context: a string store that lives exactly as long as the owning session
//! and is dropped with it. Nothing is persisted to disk and nothing is
//! shared across sessions, which is precisely the scoping the guard's
//! deterrence model assumes.

pub mod repositories;

pub use repositories::{MemoryAttemptsRepository, MemoryRepositoryProvider};

use dashmap::DashMap;
use monban_core::SessionStore;

/// In-memory string store scoped to the owning session.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
