//! Typed reads over the data store.

use super::{Collection, DataStore, OrderItemRecord, ProductRecord, Query, StoreError};
use crate::catalog::Product;
use crate::checkout::OrderItem;
use crate::error::CommerceError;
use crate::ids::{CategoryId, OrderId};
use crate::money::Currency;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn decode<T: DeserializeOwned>(collection: Collection, rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| StoreError::InvalidRecord {
                collection,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Load the active products of a category, or all active products.
///
/// This is the initial product array the filter engine works on.
pub async fn load_products<S: DataStore + ?Sized>(
    store: &S,
    category_id: Option<&CategoryId>,
    currency: Currency,
) -> Result<Vec<Product>, CommerceError> {
    let query = match category_id {
        Some(id) => Query::for_category(id),
        None => Query::active_products(),
    };

    let rows = store.query(Collection::Products, &query).await?;
    decode::<ProductRecord>(Collection::Products, rows)?
        .into_iter()
        .map(|record| record.into_product(currency))
        .collect()
}

/// Load the items of an order.
pub async fn load_order_items<S: DataStore + ?Sized>(
    store: &S,
    order_id: &OrderId,
    currency: Currency,
) -> Result<Vec<OrderItem>, CommerceError> {
    let rows = store
        .query(Collection::OrderItems, &Query::for_order_items(order_id))
        .await?;
    decode::<OrderItemRecord>(Collection::OrderItems, rows)?
        .into_iter()
        .map(|record| record.into_order_item(currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn product_row(id: &str, category: &str, on_sale: bool, active: bool) -> Value {
        json!({
            "id": id,
            "name": id,
            "price": 10,
            "is_on_sale": on_sale,
            "sale_price": if on_sale { json!(8) } else { Value::Null },
            "category_id": category,
            "is_active": active,
            "created_at": "2026-03-01T08:00:00Z"
        })
    }

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .insert(
                Collection::Products,
                vec![
                    product_row("milk", "dairy", false, true),
                    product_row("yogurt", "dairy", true, true),
                    product_row("old-cheese", "dairy", true, false),
                    product_row("bread", "bakery", false, true),
                ],
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_load_category_products() {
        let store = seeded().await;
        let products = load_products(&store, Some(&CategoryId::new("dairy")), Currency::ILS)
            .await
            .unwrap();

        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["milk", "yogurt"]);
    }

    #[tokio::test]
    async fn test_load_specials() {
        let store = seeded().await;
        let products = load_products(&store, Some(&CategoryId::new("specials")), Currency::ILS)
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "yogurt");
        assert_eq!(products[0].effective_price().amount_cents, 800);
    }

    #[tokio::test]
    async fn test_load_all_active() {
        let store = seeded().await;
        let products = load_products(&store, None, Currency::ILS).await.unwrap();
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_row_is_reported() {
        let store = InMemoryStore::new();
        store
            .insert(
                Collection::Products,
                vec![json!({"id": "x", "name": "x", "is_active": true})],
            )
            .await
            .unwrap();

        let err = load_products(&store, None, Currency::ILS).await.unwrap_err();
        assert!(matches!(
            err,
            CommerceError::Store(StoreError::InvalidRecord { .. })
        ));
    }
}
