//! Key-value store wrapper with automatic serialization.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

type Entries = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// Type-safe key-value store.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Clones share the same entries, so a
/// handle can be given to several owners and all of them see each write.
#[derive(Debug, Clone)]
pub struct Cache {
    name: String,
    entries: Option<Entries>,
}

impl Cache {
    /// Open the default store.
    pub fn open_default() -> Self {
        Self::open("default")
    }

    /// Open a named store.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cache = grocer_cache::Cache::open("storefront");
    /// assert_eq!(cache.name(), "storefront");
    /// ```
    pub fn open(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Some(Arc::new(RwLock::new(HashMap::new()))),
        }
    }

    /// Open a store that rejects every operation.
    ///
    /// Mirrors client storage that is switched off or out of quota; callers
    /// use it to check that they degrade instead of failing.
    pub fn disabled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: None,
        }
    }

    /// Name of the store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let entries = self.entries()?;
        let guard = entries
            .read()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        match guard.get(key) {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        let entries = self.entries()?;
        let mut guard = entries
            .write()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        guard.insert(key.to_string(), bytes);
        tracing::trace!(store = %self.name, key, "cache entry written");
        Ok(())
    }

    /// Delete a value from the cache.
    ///
    /// Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        let entries = self.entries()?;
        let mut guard = entries
            .write()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        guard.remove(key);
        Ok(())
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries()?;
        let guard = entries
            .read()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(guard.contains_key(key))
    }

    fn entries(&self) -> Result<&Entries, CacheError> {
        self.entries
            .as_ref()
            .ok_or_else(|| CacheError::Unavailable(format!("store '{}' is disabled", self.name)))
    }
}
