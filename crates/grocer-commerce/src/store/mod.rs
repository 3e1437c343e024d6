//! Data store contract.
//!
//! All persistence lives in an external hosted backend. The storefront only
//! needs three operations on it: insert records, patch a record by id, and
//! read the records matching a conjunction of conditions. Records travel as
//! JSON objects; `records` defines their typed shapes.

mod load;
mod memory;
mod query;
mod records;

pub use load::{load_order_items, load_products};
pub use memory::{InMemoryStore, StoreOp};
pub use query::{Condition, Query};
pub use records::{
    DeliveryWindowRecord, FulfillmentDetails, NewOrderItemRecord, NewOrderRecord,
    OrderItemRecord, PickedQuantityPatch, PickingCompletePatch, ProductRecord,
    SalePatch,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Collections the storefront reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Products,
    Categories,
    Orders,
    OrderItems,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Categories => "categories",
            Collection::Orders => "orders",
            Collection::OrderItems => "order_items",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors reported by a data store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend refused the write or read.
    #[error("{collection}: {message}")]
    Rejected {
        collection: Collection,
        message: String,
    },

    /// No record with the given id.
    #[error("{collection}: no record with id {id}")]
    NotFound { collection: Collection, id: String },

    /// A record did not have the expected shape.
    #[error("invalid record in {collection}: {message}")]
    InvalidRecord {
        collection: Collection,
        message: String,
    },

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The CRUD contract of the hosted backend.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert records as one write, returning them with generated ids.
    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError>;

    /// Merge `patch` into the record with the given id.
    async fn update(&self, collection: Collection, id: &str, patch: Value)
        -> Result<(), StoreError>;

    /// Read all records matching the query.
    async fn query(&self, collection: Collection, query: &Query) -> Result<Vec<Value>, StoreError>;
}

/// Extract the generated `id` of an inserted record.
pub(crate) fn record_id(collection: Collection, record: &Value) -> Result<String, StoreError> {
    match record.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(StoreError::InvalidRecord {
            collection,
            message: "record has no id".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::OrderItems.as_str(), "order_items");
        assert_eq!(Collection::Products.to_string(), "products");
    }

    #[test]
    fn test_record_id() {
        assert_eq!(
            record_id(Collection::Orders, &json!({"id": "o-1"})).unwrap(),
            "o-1"
        );
        assert_eq!(record_id(Collection::Orders, &json!({"id": 42})).unwrap(), "42");
        assert!(matches!(
            record_id(Collection::Orders, &json!({"name": "x"})),
            Err(StoreError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_error_message() {
        let err = StoreError::Rejected {
            collection: Collection::Orders,
            message: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "orders: permission denied");
    }
}
