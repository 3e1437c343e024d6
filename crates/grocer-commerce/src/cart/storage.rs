//! Cart persistence.

use crate::cart::CartItem;
use crate::error::CommerceError;
use grocer_cache::Cache;
use std::sync::{Arc, Mutex};

/// Default key the cart is stored under.
pub const DEFAULT_CART_KEY: &str = "grocer-cart";

/// Where a cart's items are kept between sessions.
pub trait CartStorage {
    /// Read the stored items; an absent cart is empty.
    fn load(&self) -> Result<Vec<CartItem>, CommerceError>;

    /// Replace the stored items.
    fn save(&self, items: &[CartItem]) -> Result<(), CommerceError>;
}

/// Cart storage over the key-value cache.
#[derive(Debug, Clone)]
pub struct KvCartStorage {
    cache: Cache,
    key: String,
}

impl KvCartStorage {
    /// Store the cart under the default key.
    pub fn new(cache: Cache) -> Self {
        Self::with_key(cache, DEFAULT_CART_KEY)
    }

    /// Store the cart under a custom key.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CartStorage for KvCartStorage {
    fn load(&self) -> Result<Vec<CartItem>, CommerceError> {
        Ok(self.cache.get(&self.key)?.unwrap_or_default())
    }

    /// An empty cart removes the key instead of storing an empty list.
    fn save(&self, items: &[CartItem]) -> Result<(), CommerceError> {
        if items.is_empty() {
            self.cache.delete(&self.key)?;
        } else {
            self.cache.set(&self.key, &items)?;
        }
        Ok(())
    }
}

/// Cart storage held in memory.
///
/// Clones share the same items, so a test can keep a handle after moving
/// the storage into a [`CartStore`](crate::cart::CartStore).
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    items: Vec<CartItem>,
    saves: usize,
    failing: bool,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given items stored.
    pub fn with_items(items: Vec<CartItem>) -> Self {
        let storage = Self::default();
        if let Ok(mut state) = storage.inner.lock() {
            state.items = items;
        }
        storage
    }

    /// Make every subsequent load and save fail.
    pub fn fail(&self) {
        if let Ok(mut state) = self.inner.lock() {
            state.failing = true;
        }
    }

    /// Currently stored items.
    pub fn items(&self) -> Vec<CartItem> {
        self.inner
            .lock()
            .map(|state| state.items.clone())
            .unwrap_or_default()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.inner.lock().map(|state| state.saves).unwrap_or(0)
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Vec<CartItem>, CommerceError> {
        let state = self
            .inner
            .lock()
            .map_err(|_| CommerceError::Serialization("cart storage poisoned".into()))?;
        if state.failing {
            return Err(CommerceError::Cache(grocer_cache::CacheError::Unavailable(
                "cart storage offline".into(),
            )));
        }
        Ok(state.items.clone())
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CommerceError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| CommerceError::Serialization("cart storage poisoned".into()))?;
        if state.failing {
            return Err(CommerceError::Cache(grocer_cache::CacheError::Unavailable(
                "cart storage offline".into(),
            )));
        }
        state.items = items.to_vec();
        state.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::{Currency, Money};
    use rust_decimal::Decimal;

    fn item(id: &str, quantity: i64) -> CartItem {
        CartItem {
            product: Product::new(id, id, Money::from_units(5, Currency::ILS)),
            quantity: Decimal::from(quantity),
        }
    }

    #[test]
    fn test_kv_storage_round_trip() {
        let cache = Cache::open("storage-test");
        let storage = KvCartStorage::new(cache.clone());

        assert!(storage.load().unwrap().is_empty());

        storage.save(&[item("a", 2), item("b", 1)]).unwrap();
        let loaded = storage.load().unwrap();
        assert_eq!(loaded, vec![item("a", 2), item("b", 1)]);
        assert!(cache.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_kv_storage_custom_key() {
        let cache = Cache::open("storage-test");
        let storage = KvCartStorage::with_key(cache.clone(), "tab-2");
        storage.save(&[item("a", 1)]).unwrap();

        assert!(cache.exists("tab-2").unwrap());
        assert!(!cache.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_kv_storage_empty_cart_removes_key() {
        let cache = Cache::open("storage-test");
        let storage = KvCartStorage::new(cache.clone());
        storage.save(&[item("a", 1)]).unwrap();

        storage.save(&[]).unwrap();

        assert!(!cache.exists(DEFAULT_CART_KEY).unwrap());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_kv_storage_unavailable() {
        let storage = KvCartStorage::new(Cache::disabled("off"));
        assert!(matches!(storage.save(&[]), Err(CommerceError::Cache(_))));
        assert!(storage.load().is_err());
    }

    #[test]
    fn test_memory_storage_shares_state() {
        let storage = MemoryCartStorage::new();
        let handle = storage.clone();

        storage.save(&[item("a", 1)]).unwrap();
        assert_eq!(handle.items().len(), 1);
        assert_eq!(handle.saves(), 1);

        handle.fail();
        assert!(storage.save(&[]).is_err());
        assert_eq!(handle.items().len(), 1);
    }
}
