//! Grocery storefront domain types and logic.
//!
//! This crate provides the in-process core of a grocery storefront and its
//! back office:
//!
//! - **Catalog**: Products sold per unit, pack or kilogram; categories
//! - **Cart**: Persistent cart with sale-aware totals
//! - **Search**: In-memory product filtering, sorting and price bounds
//! - **Picking**: Confirming picked quantities before an order is prepared
//! - **Checkout**: Turning a cart into an order with a delivery window
//! - **Store**: The CRUD contract of the hosted backend
//!
//! # Example
//!
//! ```rust
//! use grocer_commerce::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let bread = Product::new("bread", "Sourdough", Money::from_units(10, Currency::ILS));
//! let tomatoes = Product::new("tomatoes", "Tomatoes", Money::from_units(4, Currency::ILS))
//!     .with_unit_type(UnitType::Kg);
//!
//! let mut cart = CartStore::new(MemoryCartStorage::new(), Currency::ILS);
//! cart.add_item(bread, Decimal::from(2)).unwrap();
//! cart.add_item(tomatoes, Decimal::new(15, 1)).unwrap();
//!
//! assert_eq!(cart.estimated_total().unwrap().display(), "₪23.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod picking;
pub mod promotions;
pub mod search;
pub mod store;

pub use error::CommerceError;
pub use ids::{CategoryId, OrderId, OrderItemId, ProductId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{CategoryId, OrderId, OrderItemId, ProductId};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, UnitType};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartStorage, CartStore, KvCartStorage, MemoryCartStorage};

    // Search
    pub use crate::search::{compute_view, FilterSpec, FilterView, PriceBounds, ProductFilter, SortOption};

    // Picking
    pub use crate::picking::{PickState, PickingSession};

    // Checkout
    pub use crate::checkout::{
        submit_order, CheckoutReceipt, CheckoutRequest, Customer, DeliveryAddress,
        DeliveryWindow, Fulfillment, Order, OrderItem, OrderNumber, OrderStatus, PaymentMethod,
        TimeSlot,
    };

    // Store
    pub use crate::store::{load_products, Collection, DataStore, InMemoryStore, Query, StoreError};

    pub use crate::config::StorefrontConfig;
    pub use crate::promotions::{BulkDiscount, PromotionReport};
}
