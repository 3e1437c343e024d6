//! Commerce error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Order item not part of the picking session.
    #[error("Order item not found: {0}")]
    OrderItemNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(Decimal),

    /// Discount percentage outside (0, 100).
    #[error("Invalid discount: {0}%")]
    InvalidDiscount(Decimal),

    /// Checkout attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Time slot outside the allowed set.
    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),

    /// Weighed item marked found without an entered weight.
    #[error("Item {0} is sold by weight; enter the picked weight")]
    WeightRequired(String),

    /// Order status change that the lifecycle does not allow.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Picking commit attempted while items remain unresolved.
    #[error("Picking incomplete: {remaining} item(s) remaining")]
    PickingIncomplete { remaining: usize },

    /// Some per-item picking writes failed; the order status was left unchanged.
    #[error("Picking commit failed for item(s): {}", .failed.join(", "))]
    PickingCommitFailed { failed: Vec<String> },

    /// The order record could not be created.
    #[error("Order creation failed: {0}")]
    OrderCreationFailed(String),

    /// The order was created but its items could not be written.
    #[error("Order {order_id} created but its items failed: {message}")]
    OrderItemsFailed {
        order_id: String,
        message: String,
        /// Whether the orphaned order was marked cancelled.
        compensated: bool,
    },

    /// Amounts in different currencies.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Data store error.
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] grocer_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

impl CommerceError {
    /// Check if this error was caused by caller input rather than a backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::InvalidQuantity(_)
                | CommerceError::CurrencyMismatch { .. }
                | CommerceError::InvalidDiscount(_)
                | CommerceError::EmptyCart
                | CommerceError::CheckoutIncomplete(_)
                | CommerceError::InvalidTimeSlot(_)
                | CommerceError::WeightRequired(_)
                | CommerceError::InvalidStatusTransition { .. }
                | CommerceError::PickingIncomplete { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_failed_message_lists_items() {
        let err = CommerceError::PickingCommitFailed {
            failed: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Picking commit failed for item(s): a, b");
    }

    #[test]
    fn test_validation_classification() {
        assert!(CommerceError::EmptyCart.is_validation());
        assert!(CommerceError::PickingIncomplete { remaining: 2 }.is_validation());
        assert!(!CommerceError::OrderCreationFailed("down".into()).is_validation());
    }
}
