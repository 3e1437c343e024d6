//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a product is measured and sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Sold by weight; quantities are fractional kilograms.
    Kg,
    /// Sold per piece.
    #[default]
    Unit,
    /// Sold per pack.
    Pack,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Kg => "kg",
            UnitType::Unit => "unit",
            UnitType::Pack => "pack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kg" => Some(UnitType::Kg),
            "unit" => Some(UnitType::Unit),
            "pack" => Some(UnitType::Pack),
            _ => None,
        }
    }

    /// Check if quantities of this unit are weights.
    pub fn is_weighted(&self) -> bool {
        matches!(self, UnitType::Kg)
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: Option<String>,
    /// Regular price per unit (or per kg).
    pub price: Money,
    /// How the product is sold.
    pub unit_type: UnitType,
    /// Units on hand.
    pub stock_quantity: i64,
    /// Whether the sale price applies.
    pub is_on_sale: bool,
    /// Sale price, meaningful only while `is_on_sale` is set.
    pub sale_price: Option<Money>,
    /// Owning category.
    pub category_id: Option<CategoryId>,
    /// Whether the product is listed in the storefront.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new active product sold per unit, with no stock on hand.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            unit_type: UnitType::Unit,
            stock_quantity: 0,
            is_on_sale: false,
            sale_price: None,
            category_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the unit type.
    pub fn with_unit_type(mut self, unit_type: UnitType) -> Self {
        self.unit_type = unit_type;
        self
    }

    /// Set the stock on hand.
    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Put the product on sale at the given price.
    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.is_on_sale = true;
        self.sale_price = Some(sale_price);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Set the creation time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// The price a shopper pays per unit right now.
    ///
    /// This is the sale price when the product is on sale and a sale price is
    /// set, otherwise the regular price. Cart totals, filtering and order
    /// line pricing all go through here.
    pub fn effective_price(&self) -> Money {
        match (self.is_on_sale, self.sale_price) {
            (true, Some(sale_price)) => sale_price,
            _ => self.price,
        }
    }

    /// Currency of the product's prices.
    pub fn currency(&self) -> Currency {
        self.price.currency
    }

    /// Check if any stock is on hand.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Check if the sale price is actually in effect.
    pub fn has_active_sale(&self) -> bool {
        self.effective_price() != self.price
    }

    /// Percentage saved against the regular price, if on sale.
    pub fn discount_percentage(&self) -> Option<Decimal> {
        if !self.has_active_sale() || self.price.amount_cents <= 0 {
            return None;
        }
        let savings = self.price.amount_cents - self.effective_price().amount_cents;
        Some(
            (Decimal::from(savings) * Decimal::ONE_HUNDRED
                / Decimal::from(self.price.amount_cents))
            .round_dp(2),
        )
    }

    /// Case-insensitive substring match against name or description.
    pub fn matches_text(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
            || self
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(needle_lowercase))
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shekels(units: i64) -> Money {
        Money::from_units(units, Currency::ILS)
    }

    #[test]
    fn test_effective_price_on_sale() {
        let product = Product::new("p1", "Hummus", shekels(10)).with_sale_price(shekels(5));
        assert_eq!(product.effective_price(), shekels(5));
        assert!(product.has_active_sale());
    }

    #[test]
    fn test_effective_price_ignores_sale_price_when_not_on_sale() {
        let mut product = Product::new("p1", "Hummus", shekels(10)).with_sale_price(shekels(5));
        product.is_on_sale = false;

        assert_eq!(product.effective_price(), shekels(10));
        assert!(!product.has_active_sale());
    }

    #[test]
    fn test_effective_price_on_sale_without_sale_price() {
        let mut product = Product::new("p1", "Hummus", shekels(10));
        product.is_on_sale = true;

        assert_eq!(product.effective_price(), shekels(10));
    }

    #[test]
    fn test_discount_percentage() {
        let product = Product::new("p1", "Hummus", shekels(20)).with_sale_price(shekels(15));
        assert_eq!(product.discount_percentage(), Some(Decimal::from(25)));

        let plain = Product::new("p2", "Pita", shekels(20));
        assert_eq!(plain.discount_percentage(), None);
    }

    #[test]
    fn test_matches_text() {
        let product = Product::new("p1", "Goat Cheese", shekels(30))
            .with_description("Soft, from the Galilee");

        assert!(product.matches_text("goat"));
        assert!(product.matches_text("galilee"));
        assert!(!product.matches_text("cow"));
    }

    #[test]
    fn test_unit_type_strings() {
        assert_eq!(UnitType::Kg.as_str(), "kg");
        assert_eq!(UnitType::from_str("PACK"), Some(UnitType::Pack));
        assert_eq!(UnitType::from_str("litre"), None);
        assert!(UnitType::Kg.is_weighted());
        assert!(!UnitType::Unit.is_weighted());

        assert_eq!(serde_json::to_string(&UnitType::Kg).unwrap(), r#""kg""#);
    }
}
