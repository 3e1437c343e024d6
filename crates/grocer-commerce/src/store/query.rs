//! Query conditions for the data store.

use crate::catalog::Category;
use crate::ids::{CategoryId, OrderId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single condition on a record field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Condition {
    /// Field equals the value.
    Eq { field: String, value: Value },
    /// Field is boolean `true`.
    IsTrue(String),
    /// String field contains the needle, ignoring case.
    Contains { field: String, needle: String },
}

impl Condition {
    /// Create an equality condition.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a boolean condition.
    pub fn is_true(field: impl Into<String>) -> Self {
        Condition::IsTrue(field.into())
    }

    /// Create a case-insensitive substring condition.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Condition::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Evaluate the condition against a JSON record.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Condition::Eq { field, value } => record.get(field) == Some(value),
            Condition::IsTrue(field) => record.get(field) == Some(&Value::Bool(true)),
            Condition::Contains { field, needle } => record
                .get(field)
                .and_then(Value::as_str)
                .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
        }
    }
}

/// A conjunction of conditions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Query {
    /// Conditions that must all hold.
    pub conditions: Vec<Condition>,
}

impl Query {
    /// A query matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a condition.
    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Active products of a category.
    ///
    /// The specials pseudo-category selects every product on sale instead of
    /// a stored category.
    pub fn for_category(category_id: &CategoryId) -> Self {
        let query = Self::active_products();
        if Category::is_specials(category_id) {
            query.with(Condition::is_true("is_on_sale"))
        } else {
            query.with(Condition::eq("category_id", category_id.as_str()))
        }
    }

    /// All active products.
    pub fn active_products() -> Self {
        Self::all().with(Condition::is_true("is_active"))
    }

    /// Items of one order.
    pub fn for_order_items(order_id: &OrderId) -> Self {
        Self::all().with(Condition::eq("order_id", order_id.as_str()))
    }

    /// Evaluate the query against a JSON record.
    pub fn matches(&self, record: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(Query::all().matches(&json!({"anything": 1})));
    }

    #[test]
    fn test_category_query() {
        let query = Query::for_category(&CategoryId::new("dairy"));

        assert!(query.matches(&json!({"category_id": "dairy", "is_active": true})));
        assert!(!query.matches(&json!({"category_id": "dairy", "is_active": false})));
        assert!(!query.matches(&json!({"category_id": "bakery", "is_active": true})));
    }

    #[test]
    fn test_specials_query_selects_on_sale_products() {
        let query = Query::for_category(&CategoryId::new("specials"));

        assert!(query.matches(&json!({"category_id": "dairy", "is_active": true, "is_on_sale": true})));
        assert!(!query.matches(&json!({"category_id": "specials", "is_active": true, "is_on_sale": false})));
    }

    #[test]
    fn test_contains_ignores_case() {
        let query = Query::all().with(Condition::contains("name", "CHEESE"));

        assert!(query.matches(&json!({"name": "Goat cheese"})));
        assert!(!query.matches(&json!({"name": "Milk"})));
        assert!(!query.matches(&json!({"name": 3})));
    }

    #[test]
    fn test_order_items_query() {
        let query = Query::for_order_items(&OrderId::new("o-1"));
        assert!(query.matches(&json!({"order_id": "o-1"})));
        assert!(!query.matches(&json!({"order_id": "o-2"})));
    }
}
