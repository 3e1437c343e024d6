//! Filter specification.

use crate::money::Money;
use crate::search::PriceBounds;
use serde::{Deserialize, Serialize};

/// Sort options for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Sort by newest first.
    #[default]
    Newest,
    /// Sort by effective price, low to high.
    PriceAsc,
    /// Sort by effective price, high to low.
    PriceDesc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(SortOption::Newest),
            "price-asc" => Some(SortOption::PriceAsc),
            "price-desc" => Some(SortOption::PriceDesc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }
}

/// User-selected filter criteria.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    /// Lowest effective price shown, inclusive.
    pub min_price: Money,
    /// Highest effective price shown, inclusive.
    pub max_price: Money,
    /// Text matched against name and description; blank means no search.
    pub search_query: String,
    /// Hide products without stock.
    pub in_stock_only: bool,
    /// Sort order.
    pub sort: SortOption,
}

impl FilterSpec {
    /// Criteria that let every product within `bounds` through.
    pub fn for_bounds(bounds: PriceBounds) -> Self {
        Self {
            min_price: bounds.min,
            max_price: bounds.max,
            search_query: String::new(),
            in_stock_only: false,
            sort: SortOption::Newest,
        }
    }

    /// Set the text query.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.search_query = q.into();
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Only show in-stock products.
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// The lowercase search needle, or `None` when the query is blank.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.search_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_sort_option_strings() {
        assert_eq!(SortOption::default(), SortOption::Newest);
        assert_eq!(SortOption::from_str("price-asc"), Some(SortOption::PriceAsc));
        assert_eq!(SortOption::from_str("rating"), None);
        assert_eq!(
            serde_json::to_string(&SortOption::PriceDesc).unwrap(),
            r#""price-desc""#
        );
    }

    #[test]
    fn test_spec_builder() {
        let bounds = PriceBounds::default_for(Currency::ILS);
        let spec = FilterSpec::for_bounds(bounds)
            .with_query("  Cheese ")
            .in_stock_only()
            .with_sort(SortOption::PriceAsc);

        assert_eq!(spec.min_price, Money::zero(Currency::ILS));
        assert_eq!(spec.max_price, Money::from_units(100, Currency::ILS));
        assert_eq!(spec.needle(), Some("cheese".to_string()));
        assert!(spec.in_stock_only);
    }

    #[test]
    fn test_blank_query_has_no_needle() {
        let spec = FilterSpec::for_bounds(PriceBounds::default_for(Currency::ILS)).with_query("   ");
        assert_eq!(spec.needle(), None);
    }
}
