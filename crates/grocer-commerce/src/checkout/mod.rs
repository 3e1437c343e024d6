//! Checkout module.
//!
//! Contains the checkout request, time slots, orders and the submission
//! flow that turns a cart into an order.

mod address;
mod order;
mod request;
mod slot;
mod submit;

pub use address::{Customer, DeliveryAddress};
pub use order::{
    Fulfillment, FulfillmentMethod, Order, OrderItem, OrderNumber, OrderStatus, PaymentMethod,
};
pub use request::CheckoutRequest;
pub use slot::{DeliveryWindow, TimeSlot};
pub use submit::{build_item_records, build_order_record, submit_order, CheckoutReceipt};
