//! Checkout request.

use crate::checkout::{Customer, DeliveryWindow, Fulfillment, PaymentMethod, TimeSlot};
use crate::error::CommerceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the shopper filled in at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub fulfillment: Fulfillment,
    pub payment_method: PaymentMethod,
    pub delivery_window: DeliveryWindow,
}

impl CheckoutRequest {
    pub fn new(
        customer: Customer,
        fulfillment: Fulfillment,
        payment_method: PaymentMethod,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Self {
        Self {
            customer,
            fulfillment,
            payment_method,
            delivery_window: DeliveryWindow::new(date, slot),
        }
    }

    /// Check required fields.
    ///
    /// Form validation happens before this; it only guards against
    /// submitting an order nobody can fulfil.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if let Some(field) = self.customer.missing_field() {
            return Err(CommerceError::CheckoutIncomplete(field.to_string()));
        }
        if let Some(address) = self.fulfillment.address() {
            if !address.is_complete() {
                return Err(CommerceError::CheckoutIncomplete(
                    "delivery address".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Check that the chosen slot is one the store offers.
    pub fn validate_slot(&self, allowed: &[TimeSlot]) -> Result<(), CommerceError> {
        let slot = self.delivery_window.slot;
        if allowed.contains(&slot) {
            Ok(())
        } else {
            Err(CommerceError::InvalidTimeSlot(slot.to_string()))
        }
    }
}
