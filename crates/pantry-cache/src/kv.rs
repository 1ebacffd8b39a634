//! Typed access over a key-value backend with automatic serialization.

use crate::{CacheError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// bytes do not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value, treating a missing, unreadable or malformed slot as
    /// `T::default()`.
    ///
    /// Failures are logged and never returned.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable cache slot");
                T::default()
            }
        }
    }

    /// Set a value in the cache, overwriting whatever the slot held.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Access the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Slot {
        name: String,
        qty: i64,
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        let slot = Slot {
            name: "Cumin".to_string(),
            qty: 2,
        };
        cache.set("slot", &slot).unwrap();

        let loaded: Option<Slot> = cache.get("slot").unwrap();
        assert_eq!(loaded, Some(slot));
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Slot> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("nothing").unwrap());
    }

    #[test]
    fn test_malformed_slot_is_error_for_get() {
        let store = MemoryStore::new();
        store.set("slot", b"{not json").unwrap();
        let cache = Cache::new(store);

        assert!(cache.get::<Slot>("slot").is_err());
    }

    #[test]
    fn test_malformed_slot_defaults() {
        let store = MemoryStore::new();
        store.set("slot", b"[1, 2").unwrap();
        let cache = Cache::new(store);

        let slot: Slot = cache.get_or_default("slot");
        assert_eq!(slot, Slot::default());
    }

    #[test]
    fn test_wrong_shape_defaults() {
        let store = MemoryStore::new();
        store.set("slot", br#"{"unexpected": true}"#).unwrap();
        let cache = Cache::new(store);

        let slot: Vec<Slot> = cache.get_or_default("slot");
        assert!(slot.is_empty());
    }

    #[test]
    fn test_delete() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("slot", &Slot::default()).unwrap();
        assert!(cache.exists("slot").unwrap());

        cache.delete("slot").unwrap();
        assert!(!cache.exists("slot").unwrap());
    }
}
