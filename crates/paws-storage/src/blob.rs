//! Key-value blob storage with automatic serialization.

use serde::{de::DeserializeOwned, Serialize};

use crate::StorageError;

/// A durable key-value store for JSON-serializable client state.
///
/// Implementations persist one blob per key. Values are serialized with
/// `serde_json`; a value that fails to deserialize surfaces as an error so
/// callers can decide how to degrade (the cart falls back to an empty state).
pub trait BlobStore {
    /// Get a value, or `None` if the key has never been written.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;

    /// Write a value under a key, replacing any previous value.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}
