//! In-memory data store.

use super::{Collection, DataStore, Query, StoreError};
use crate::ids::generate_id;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockWriteGuard};

/// Kinds of store operation, as recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Insert,
    Update,
    Query,
}

#[derive(Debug, Default)]
struct State {
    collections: HashMap<Collection, Vec<Value>>,
    journal: Vec<(StoreOp, Collection)>,
    rejected: HashSet<(StoreOp, Collection)>,
    rejected_ids: HashSet<String>,
}

/// A [`DataStore`] that keeps collections in memory.
///
/// Inserted records without an `id` get a generated one. Operations can be
/// set to fail, and every attempted operation is journaled, so hosts and
/// tests can observe write ordering.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `op` on `collection` fail.
    pub fn reject(&self, op: StoreOp, collection: Collection) {
        if let Ok(mut state) = self.state.write() {
            state.rejected.insert((op, collection));
        }
    }

    /// Make updates of the record with `id` fail.
    pub fn reject_updates_of(&self, id: impl Into<String>) {
        if let Ok(mut state) = self.state.write() {
            state.rejected_ids.insert(id.into());
        }
    }

    /// Operations attempted so far, in order.
    pub fn journal(&self) -> Vec<(StoreOp, Collection)> {
        self.state
            .read()
            .map(|state| state.journal.clone())
            .unwrap_or_default()
    }

    /// Count the attempted operations of one kind on one collection.
    pub fn count(&self, op: StoreOp, collection: Collection) -> usize {
        self.journal()
            .iter()
            .filter(|entry| **entry == (op, collection))
            .count()
    }

    /// All records of a collection.
    pub fn records(&self, collection: Collection) -> Vec<Value> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.collections.get(&collection).cloned())
            .unwrap_or_default()
    }

    /// Look up a record by id.
    pub fn get(&self, collection: Collection, id: &str) -> Option<Value> {
        self.records(collection)
            .into_iter()
            .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
    }

    fn begin(
        &self,
        op: StoreOp,
        collection: Collection,
    ) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        state.journal.push((op, collection));
        if state.rejected.contains(&(op, collection)) {
            return Err(StoreError::Rejected {
                collection,
                message: format!("{:?} rejected", op).to_lowercase(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let mut state = self.begin(StoreOp::Insert, collection)?;

        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            let Value::Object(mut fields) = record else {
                return Err(StoreError::InvalidRecord {
                    collection,
                    message: "record is not an object".to_string(),
                });
            };
            fields
                .entry("id")
                .or_insert_with(|| Value::String(generate_id()));
            inserted.push(Value::Object(fields));
        }

        state
            .collections
            .entry(collection)
            .or_default()
            .extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let mut state = self.begin(StoreOp::Update, collection)?;
        if state.rejected_ids.contains(id) {
            return Err(StoreError::Rejected {
                collection,
                message: format!("update of {} rejected", id),
            });
        }

        let Value::Object(patch) = patch else {
            return Err(StoreError::InvalidRecord {
                collection,
                message: "patch is not an object".to_string(),
            });
        };

        let record = state
            .collections
            .get_mut(&collection)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            })
            .and_then(Value::as_object_mut)
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;

        for (key, value) in patch {
            record.insert(key, value);
        }
        Ok(())
    }

    async fn query(&self, collection: Collection, query: &Query) -> Result<Vec<Value>, StoreError> {
        let state = self.begin(StoreOp::Query, collection)?;
        Ok(state
            .collections
            .get(&collection)
            .map(|rows| rows.iter().filter(|row| query.matches(row)).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Condition;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_generates_ids() {
        let store = InMemoryStore::new();
        let inserted = store
            .insert(Collection::Orders, vec![json!({"status": "pending"}), json!({"id": "fixed"})])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert_eq!(inserted[0]["id"].as_str().unwrap().len(), 32);
        assert_eq!(inserted[1]["id"], "fixed");
        assert_eq!(store.records(Collection::Orders).len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let store = InMemoryStore::new();
        store
            .insert(Collection::Orders, vec![json!({"id": "o1", "status": "pending", "total": 10})])
            .await
            .unwrap();

        store
            .update(Collection::Orders, "o1", json!({"status": "preparing"}))
            .await
            .unwrap();

        let order = store.get(Collection::Orders, "o1").unwrap();
        assert_eq!(order["status"], "preparing");
        assert_eq!(order["total"], 10);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryStore::new();
        let err = store
            .update(Collection::Orders, "nope", json!({"status": "preparing"}))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_query_filters() {
        let store = InMemoryStore::new();
        store
            .insert(
                Collection::Products,
                vec![json!({"name": "a", "is_active": true}), json!({"name": "b", "is_active": false})],
            )
            .await
            .unwrap();

        let rows = store
            .query(Collection::Products, &Query::all().with(Condition::is_true("is_active")))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "a");
    }

    #[tokio::test]
    async fn test_rejected_operations_are_journaled() {
        let store = InMemoryStore::new();
        store.reject(StoreOp::Insert, Collection::Orders);

        let err = store
            .insert(Collection::Orders, vec![json!({})])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Rejected { .. }));
        assert_eq!(store.count(StoreOp::Insert, Collection::Orders), 1);
        assert!(store.records(Collection::Orders).is_empty());
    }

    #[tokio::test]
    async fn test_rejected_update_by_id() {
        let store = InMemoryStore::new();
        store
            .insert(Collection::OrderItems, vec![json!({"id": "i1"}), json!({"id": "i2"})])
            .await
            .unwrap();
        store.reject_updates_of("i2");

        assert!(store
            .update(Collection::OrderItems, "i1", json!({"quantity_actual": 1}))
            .await
            .is_ok());
        assert!(store
            .update(Collection::OrderItems, "i2", json!({"quantity_actual": 1}))
            .await
            .is_err());
    }
}
