//! Test stores: `KeyValueStore` implementations for failure paths.

use heartline_core::error::DomainError;
use heartline_core::store::{KeyValueStore, StoreKey};

/// A store whose every operation fails. Useful for checking that store
/// failures are absorbed rather than propagated.
#[derive(Debug)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: StoreKey) -> Result<Option<String>, DomainError> {
        Err(DomainError::Store("quota exceeded".into()))
    }

    fn set(&self, _key: StoreKey, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Store("quota exceeded".into()))
    }

    fn remove(&self, _key: StoreKey) -> Result<(), DomainError> {
        Err(DomainError::Store("quota exceeded".into()))
    }
}
