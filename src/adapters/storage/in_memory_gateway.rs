//! In-Memory Persistence Gateway
//!
//! Keeps values in a shared map. Useful for testing and for hosts that
//! embed the wizard without durable storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{PersistenceError, PersistenceGateway};

/// In-memory key/value store
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryGateway {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored keys
    pub fn len(&self) -> Result<usize, PersistenceError> {
        Ok(self.entries.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PersistenceError> {
        Ok(self.len()? == 0)
    }

    /// Clear all stored data (useful for tests)
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.entries.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

fn poisoned<T>(_: T) -> PersistenceError {
    PersistenceError::Unavailable("in-memory store lock poisoned".to_string())
}

impl PersistenceGateway for InMemoryGateway {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
