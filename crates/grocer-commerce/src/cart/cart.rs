//! Cart and cart item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the cart with the quantity wanted.
///
/// The product is a snapshot taken when it was added. Quantities of
/// weight-based products are fractional kilograms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product snapshot.
    pub product: Product,
    /// Quantity, always positive.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

impl CartItem {
    /// Effective unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .effective_price()
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
///
/// Items keep their insertion order and there is at most one item per
/// product. The total is never stored; it is recomputed from the items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from persisted items.
    ///
    /// Items with a non-positive quantity are dropped and repeated products
    /// are merged, so a hand-edited or stale payload still yields a valid cart.
    /// A repeat whose merged quantity would overflow is dropped.
    pub fn from_items(items: Vec<CartItem>, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        for item in items {
            if item.quantity <= Decimal::ZERO || item.product.currency() != currency {
                continue;
            }
            match cart.position(&item.product.id) {
                Some(idx) => {
                    let line = &mut cart.items[idx];
                    if let Some(merged) = line.quantity.checked_add(item.quantity) {
                        line.quantity = merged;
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.product.id == product_id)
    }

    /// Add a product to the cart.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `quantity`; otherwise a new item is appended.
    ///
    /// Returns an error if the quantity is not positive or the product is
    /// priced in another currency.
    pub fn add_item(&mut self, product: Product, quantity: Decimal) -> Result<(), CommerceError> {
        if quantity <= Decimal::ZERO {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if product.currency() != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.currency().code().to_string(),
            });
        }

        match self.position(&product.id) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
            }
            None => self.items.push(CartItem { product, quantity }),
        }
        Ok(())
    }

    /// Remove a product from the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product.id != product_id);
        self.items.len() < len_before
    }

    /// Replace the quantity of a product already in the cart.
    ///
    /// A quantity of zero or less removes the product. Products not in the
    /// cart are left alone. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: Decimal) -> bool {
        if quantity <= Decimal::ZERO {
            return self.remove_item(product_id);
        }

        match self.position(product_id) {
            Some(idx) => {
                self.items[idx].quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of item quantities, saturating at the largest decimal.
    pub fn item_count(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, i| sum.saturating_add(i.quantity))
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the item for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    /// Sum of effective price times quantity over all items.
    pub fn estimated_total(&self) -> Result<Money, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;

        Money::try_sum(lines.iter(), self.currency).ok_or(CommerceError::Overflow)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitType;

    fn shekels(units: i64) -> Money {
        Money::from_units(units, Currency::ILS)
    }

    fn bread() -> Product {
        Product::new("bread", "Bread", shekels(10))
    }

    fn tomatoes() -> Product {
        Product::new("tomatoes", "Tomatoes", shekels(4)).with_unit_type(UnitType::Kg)
    }

    fn qty(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::ILS);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), Decimal::ZERO);
        assert!(cart.estimated_total().unwrap().is_zero());
    }

    #[test]
    fn test_add_same_product_aggregates() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread(), qty("1")).unwrap();
        cart.add_item(bread(), qty("2")).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), qty("3"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(tomatoes(), qty("1")).unwrap();
        cart.add_item(bread(), qty("1")).unwrap();
        cart.add_item(tomatoes(), qty("0.5")).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["tomatoes", "bread"]);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new(Currency::ILS);
        assert!(matches!(
            cart.add_item(bread(), Decimal::ZERO),
            Err(CommerceError::InvalidQuantity(_))
        ));
        assert!(cart.add_item(bread(), qty("-1")).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_currency_mismatch() {
        let mut cart = Cart::new(Currency::ILS);
        let product = Product::new("p", "Imported", Money::from_units(3, Currency::USD));
        assert!(matches!(
            cart.add_item(product, qty("1")),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread(), qty("2")).unwrap();

        assert!(cart.set_quantity(&ProductId::new("bread"), Decimal::ZERO));
        assert!(cart.get(&ProductId::new("bread")).is_none());
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread(), qty("2")).unwrap();

        assert!(cart.set_quantity(&ProductId::new("bread"), qty("5")));
        assert_eq!(cart.item_count(), qty("5"));
    }

    #[test]
    fn test_set_quantity_of_missing_product_is_noop() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread(), qty("2")).unwrap();

        assert!(!cart.set_quantity(&ProductId::new("milk"), qty("3")));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), qty("2"));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread(), qty("1")).unwrap();

        assert!(cart.remove_item(&ProductId::new("bread")));
        assert!(!cart.remove_item(&ProductId::new("bread")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_estimated_total() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread(), qty("2")).unwrap();
        cart.add_item(tomatoes(), qty("1.5")).unwrap();

        // 2 x 10.00 + 1.5 x 4.00
        assert_eq!(cart.estimated_total().unwrap(), Money::new(2300, Currency::ILS));
    }

    #[test]
    fn test_estimated_total_uses_sale_price() {
        let mut cart = Cart::new(Currency::ILS);
        cart.add_item(bread().with_sale_price(shekels(8)), qty("3"))
            .unwrap();

        assert_eq!(cart.estimated_total().unwrap(), shekels(24));
    }

    #[test]
    fn test_from_items_normalizes() {
        let items = vec![
            CartItem { product: bread(), quantity: qty("1") },
            CartItem { product: tomatoes(), quantity: qty("0") },
            CartItem { product: bread(), quantity: qty("2") },
        ];

        let cart = Cart::from_items(items, Currency::ILS);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), qty("3"));
    }

    #[test]
    fn test_from_items_drops_overflowing_repeat() {
        let items = vec![
            CartItem { product: bread(), quantity: Decimal::MAX },
            CartItem { product: bread(), quantity: qty("1") },
            CartItem { product: tomatoes(), quantity: qty("2") },
        ];

        let cart = Cart::from_items(items, Currency::ILS);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.get(&bread().id).unwrap().quantity, Decimal::MAX);
        assert_eq!(cart.item_count(), Decimal::MAX);
    }
}
