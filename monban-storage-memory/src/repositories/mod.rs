//! Repository implementations for in-memory storage

pub mod attempts;

pub use attempts::MemoryAttemptsRepository;

use std::sync::Arc;

use monban_core::repositories::AttemptsRepositoryProvider;

use crate::MemorySessionStore;

/// Repository provider implementation for the in-memory session store.
pub struct MemoryRepositoryProvider {
    store: Arc<MemorySessionStore>,
    attempts: Arc<MemoryAttemptsRepository>,
}

impl MemoryRepositoryProvider {
    pub fn new(store: Arc<MemorySessionStore>) -> Self {
        let attempts = Arc::new(MemoryAttemptsRepository::new(store.clone()));
        Self { store, attempts }
    }

    /// The underlying session store. Mostly useful to tests that want to
    /// inspect or corrupt the stored record.
    pub fn store(&self) -> Arc<MemorySessionStore> {
        self.store.clone()
    }
}

impl Default for MemoryRepositoryProvider {
    fn default() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }
}

impl AttemptsRepositoryProvider for MemoryRepositoryProvider {
    type AttemptsRepo = MemoryAttemptsRepository;

    fn attempts(&self) -> Arc<Self::AttemptsRepo> {
        self.attempts.clone()
    }
}
