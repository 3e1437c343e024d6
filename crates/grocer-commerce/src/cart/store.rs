//! Persistent cart service.

use crate::cart::{Cart, CartItem, CartStorage};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;

/// A cart that writes itself to storage after every change.
///
/// Storage failures never fail a cart operation; they are logged and the
/// in-memory cart stays authoritative for the session.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Start with an empty cart, ignoring anything stored.
    pub fn new(storage: S, currency: Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            storage,
        }
    }

    /// Rebuild the cart from storage.
    ///
    /// Unreadable storage yields an empty cart.
    pub fn load(storage: S, currency: Currency) -> Self {
        let cart = match storage.load() {
            Ok(items) => Cart::from_items(items, currency),
            Err(e) => {
                tracing::warn!(error = %e, "stored cart unreadable, starting empty");
                Cart::new(currency)
            }
        };
        Self { cart, storage }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn currency(&self) -> Currency {
        self.cart.currency()
    }

    /// Add a product, merging with an existing item.
    pub fn add_item(&mut self, product: Product, quantity: Decimal) -> Result<(), CommerceError> {
        self.cart.add_item(product, quantity)?;
        self.persist();
        Ok(())
    }

    /// Remove a product.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        if self.cart.remove_item(product_id) {
            self.persist();
        }
    }

    /// Set a product's quantity; zero or less removes it.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: Decimal) {
        if self.cart.set_quantity(product_id, quantity) {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    pub fn item_count(&self) -> Decimal {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn estimated_total(&self) -> Result<Money, CommerceError> {
        self.cart.estimated_total()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(self.cart.items()) {
            tracing::warn!(error = %e, items = self.cart.line_count(), "failed to persist cart");
        }
    }
}
