//! Wire shapes of store records.
//!
//! Amounts travel as decimal numbers in the store's single currency; the
//! domain types carry integer minor units plus a [`Currency`].

use crate::catalog::{Product, UnitType};
use crate::checkout::{
    DeliveryAddress, DeliveryWindow, FulfillmentMethod, OrderItem, OrderStatus, PaymentMethod,
    TimeSlot,
};
use crate::error::CommerceError;
use crate::ids::{CategoryId, OrderId, OrderItemId, ProductId};
use crate::money::{Currency, Money};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn to_money(amount: Decimal, currency: Currency) -> Result<Money, CommerceError> {
    Money::from_decimal(amount, currency).ok_or(CommerceError::Overflow)
}

/// A row of the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub unit_type: UnitType,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Decode into a catalog product priced in `currency`.
    pub fn into_product(self, currency: Currency) -> Result<Product, CommerceError> {
        let sale_price = self
            .sale_price
            .map(|amount| to_money(amount, currency))
            .transpose()?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: to_money(self.price, currency)?,
            unit_type: self.unit_type,
            stock_quantity: self.stock_quantity,
            is_on_sale: self.is_on_sale,
            sale_price,
            category_id: self.category_id,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

/// Fulfillment details of an order.
///
/// The human-facing order number is embedded here, next to the address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FulfillmentDetails {
    pub order_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<DeliveryAddress>,
    pub contact_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The delivery or pickup window of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryWindowRecord {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub start: String,
    pub end: String,
}

impl From<&DeliveryWindow> for DeliveryWindowRecord {
    fn from(window: &DeliveryWindow) -> Self {
        Self {
            date: window.date,
            slot: window.slot,
            start: window.slot.start().to_string(),
            end: window.slot.end().to_string(),
        }
    }
}

/// Payload inserted into the `orders` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrderRecord {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    pub fulfillment_method: FulfillmentMethod,
    pub delivery_details: FulfillmentDetails,
    pub payment_method: PaymentMethod,
    pub delivery_window: DeliveryWindowRecord,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price_estimated: Decimal,
}

/// Payload inserted into the `order_items` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrderItemRecord {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_type: UnitType,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_ordered: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_at_order: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_item_price: Decimal,
}

/// A stored row of the `order_items` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub unit_type: UnitType,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_ordered: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub quantity_actual: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_at_order: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_item_price: Decimal,
}

impl OrderItemRecord {
    /// Decode into an order item priced in `currency`.
    pub fn into_order_item(self, currency: Currency) -> Result<OrderItem, CommerceError> {
        Ok(OrderItem {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            product_name: self.product_name,
            unit_type: self.unit_type,
            quantity_ordered: self.quantity_ordered,
            quantity_actual: self.quantity_actual,
            price_at_order: to_money(self.price_at_order, currency)?,
            total_item_price: to_money(self.total_item_price, currency)?,
        })
    }
}

/// Patch recording the picked quantity of an order item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickedQuantityPatch {
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_actual: Decimal,
}

/// Patch closing the picking of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickingCompletePatch {
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price_final: Decimal,
}

/// Patch putting a product on sale or taking it off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalePatch {
    pub is_on_sale: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
}
