//! Filter results and price bounds.

use crate::catalog::Product;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Price range of a product list, in whole currency units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: Money,
    pub max: Money,
}

impl PriceBounds {
    /// Create bounds from whole units.
    pub fn from_units(min: i64, max: i64, currency: Currency) -> Self {
        Self {
            min: Money::from_units(min, currency),
            max: Money::from_units(max, currency),
        }
    }

    /// Create bounds from whole units, or `None` if either end does not fit.
    pub fn try_from_units(min: i64, max: i64, currency: Currency) -> Option<Self> {
        Some(Self {
            min: Money::try_from_units(min, currency)?,
            max: Money::try_from_units(max, currency)?,
        })
    }

    /// Bounds used when there are no products: 0 to 100.
    pub fn default_for(currency: Currency) -> Self {
        Self::from_units(0, 100, currency)
    }

    /// Floor of the lowest and ceiling of the highest effective price.
    ///
    /// Returns `fallback` for an empty list.
    pub fn of_or(products: &[Product], fallback: PriceBounds) -> Self {
        let mut prices = products.iter().map(Product::effective_price);
        let Some(first) = prices.next() else {
            return fallback;
        };

        let (min, max) = prices.fold((first, first), |(min, max), p| {
            (
                if p.amount_cents < min.amount_cents { p } else { min },
                if p.amount_cents > max.amount_cents { p } else { max },
            )
        });

        Self {
            min: min.floor_units(),
            max: max.ceil_units(),
        }
    }

    /// Same as [`PriceBounds::of_or`] with the 0 to 100 fallback.
    pub fn of(products: &[Product], currency: Currency) -> Self {
        Self::of_or(products, Self::default_for(currency))
    }

    /// Check if an amount lies within the bounds, inclusive.
    pub fn contains(&self, amount: &Money) -> bool {
        amount.amount_cents >= self.min.amount_cents && amount.amount_cents <= self.max.amount_cents
    }
}

/// The filtered, sorted product list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterView {
    /// Products passing every filter, in sort order.
    pub items: Vec<Product>,
    /// Number of items.
    pub filtered_count: usize,
    /// Price bounds of the unfiltered input.
    pub bounds: PriceBounds,
}

impl FilterView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(id: &str, cents: i64) -> Product {
        Product::new(id, id, Money::new(cents, Currency::ILS))
    }

    #[test]
    fn test_bounds_round_outward() {
        let products = vec![priced("a", 1250), priced("b", 399), priced("c", 2001)];
        let bounds = PriceBounds::of(&products, Currency::ILS);

        assert_eq!(bounds, PriceBounds::from_units(3, 21, Currency::ILS));
    }

    #[test]
    fn test_bounds_use_effective_price() {
        let products =
            vec![priced("a", 1000).with_sale_price(Money::new(250, Currency::ILS)), priced("b", 900)];
        let bounds = PriceBounds::of(&products, Currency::ILS);

        assert_eq!(bounds.min, Money::from_units(2, Currency::ILS));
        assert_eq!(bounds.max, Money::from_units(9, Currency::ILS));
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(
            PriceBounds::of(&[], Currency::ILS),
            PriceBounds::from_units(0, 100, Currency::ILS)
        );

        let fallback = PriceBounds::from_units(5, 50, Currency::ILS);
        assert_eq!(PriceBounds::of_or(&[], fallback), fallback);
    }

    #[test]
    fn test_contains_inclusive() {
        let bounds = PriceBounds::from_units(2, 9, Currency::ILS);
        assert!(bounds.contains(&Money::from_units(2, Currency::ILS)));
        assert!(bounds.contains(&Money::from_units(9, Currency::ILS)));
        assert!(!bounds.contains(&Money::new(901, Currency::ILS)));
    }
}
