//! Order types.

use crate::catalog::UnitType;
use crate::checkout::{Customer, DeliveryAddress, DeliveryWindow};
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// Orders move `pending → preparing → shipping → completed`, and can be
/// cancelled while pending or preparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting picking.
    #[default]
    Pending,
    /// Items picked, order being prepared.
    Preparing,
    /// Out for delivery or ready for pickup.
    Shipping,
    /// Handed to the customer.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "preparing" => Some(OrderStatus::Preparing),
            "shipping" => Some(OrderStatus::Shipping),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Shipping => "Shipping",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Preparing)
    }

    /// Check if the lifecycle allows moving to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (_, OrderStatus::Cancelled) => self.can_cancel(),
            (OrderStatus::Pending, OrderStatus::Preparing)
            | (OrderStatus::Preparing, OrderStatus::Shipping)
            | (OrderStatus::Shipping, OrderStatus::Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMethod {
    Delivery,
    Pickup,
}

impl FulfillmentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentMethod::Delivery => "delivery",
            FulfillmentMethod::Pickup => "pickup",
        }
    }
}

/// Fulfillment choice with the details each method needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Fulfillment {
    /// Home delivery to an address.
    Delivery {
        address: DeliveryAddress,
        note: Option<String>,
    },
    /// Customer collects from the store.
    Pickup { note: Option<String> },
}

impl Fulfillment {
    pub fn delivery(address: DeliveryAddress) -> Self {
        Fulfillment::Delivery {
            address,
            note: None,
        }
    }

    pub fn pickup() -> Self {
        Fulfillment::Pickup { note: None }
    }

    /// Attach a note for the courier or the store.
    pub fn with_note(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Fulfillment::Delivery { note, .. } | Fulfillment::Pickup { note } => {
                *note = Some(text.into())
            }
        }
        self
    }

    pub fn method(&self) -> FulfillmentMethod {
        match self {
            Fulfillment::Delivery { .. } => FulfillmentMethod::Delivery,
            Fulfillment::Pickup { .. } => FulfillmentMethod::Pickup,
        }
    }

    pub fn address(&self) -> Option<&DeliveryAddress> {
        match self {
            Fulfillment::Delivery { address, .. } => Some(address),
            Fulfillment::Pickup { .. } => None,
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            Fulfillment::Delivery { note, .. } | Fulfillment::Pickup { note } => note.as_deref(),
        }
    }
}

/// Human-facing 8-digit order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub const MIN: u32 = 10_000_000;
    pub const MAX: u32 = 99_999_999;

    /// Generate a random order number.
    ///
    /// Numbers are not checked for uniqueness; the order id is the key.
    pub fn generate() -> Self {
        let n = rand::thread_rng().gen_range(Self::MIN..=Self::MAX);
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: OrderNumber,
    /// Who ordered.
    pub customer: Customer,
    /// Order status.
    pub status: OrderStatus,
    /// Delivery or pickup details.
    pub fulfillment: Fulfillment,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// When the customer receives the order.
    pub delivery_window: DeliveryWindow,
    /// Total from cart prices at checkout.
    pub total_price_estimated: Money,
    /// Total from picked quantities.
    pub total_price_final: Option<Money>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Move to `next`, if the lifecycle allows it.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(next) {
            return Err(CommerceError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Cancel the order.
    pub fn cancel(&mut self) -> Result<(), CommerceError> {
        self.transition_to(OrderStatus::Cancelled)
    }

    /// The final total if picked, else the estimate.
    pub fn total(&self) -> Money {
        self.total_price_final.unwrap_or(self.total_price_estimated)
    }
}

/// A line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique line identifier.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name at time of order.
    pub product_name: String,
    /// How the product is measured.
    pub unit_type: UnitType,
    /// Quantity ordered.
    pub quantity_ordered: Decimal,
    /// Quantity actually picked; zero when missing.
    pub quantity_actual: Option<Decimal>,
    /// Effective unit price at time of order.
    pub price_at_order: Money,
    /// `price_at_order` times `quantity_ordered`.
    pub total_item_price: Money,
}

impl OrderItem {
    /// Check if quantities are weights.
    pub fn is_weighted(&self) -> bool {
        self.unit_type.is_weighted()
    }
}
