//! In-process `KeyValueStore`.

use std::collections::HashMap;
use std::sync::Mutex;

use heartline_core::error::DomainError;
use heartline_core::store::{KeyValueStore, StoreKey};

/// A store held in memory; its contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StoreKey, V)>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k, v.into())).collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<StoreKey, String>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::Store("memory store lock poisoned".to_owned()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<(), DomainError> {
        self.lock()?.insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), DomainError> {
        self.lock()?.remove(&key);
        Ok(())
    }
}
