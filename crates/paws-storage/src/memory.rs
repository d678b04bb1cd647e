//! In-memory blob store.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};

use crate::{BlobStore, StorageError};

/// Blob store backed by a process-local map.
///
/// Used in tests and as the fallback when durable storage cannot be opened.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let map = self
            .map
            .lock()
            .map_err(|_| StorageError::StoreError("lock poisoned".into()))?;
        match map.get(key) {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        let mut map = self
            .map
            .lock()
            .map_err(|_| StorageError::StoreError("lock poisoned".into()))?;
        map.insert(key.to_string(), bytes);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self
            .map
            .lock()
            .map_err(|_| StorageError::StoreError("lock poisoned".into()))?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryStore::new();
        store.set("k", &42u64).unwrap();
        assert_eq!(store.get::<u64>("k").unwrap(), Some(42));

        store.delete("k").unwrap();
        assert_eq!(store.get::<u64>("k").unwrap(), None);
    }
}
