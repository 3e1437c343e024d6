//! Product filter engine.

use crate::catalog::Product;
use crate::money::Currency;
use crate::search::{FilterSpec, FilterView, PriceBounds, SortOption};
use std::cmp::Reverse;

/// Filter and sort `products` by `spec`.
///
/// Stages run in order: text search over name or description, inclusive
/// effective-price range, in-stock, then a stable sort. The input is never
/// modified.
pub fn compute_view(products: &[Product], spec: &FilterSpec) -> FilterView {
    let bounds = PriceBounds::of(products, spec.min_price.currency);
    view_with_bounds(products, spec, bounds)
}

fn view_with_bounds(products: &[Product], spec: &FilterSpec, bounds: PriceBounds) -> FilterView {
    let range = PriceBounds {
        min: spec.min_price,
        max: spec.max_price,
    };
    let needle = spec.needle();

    let mut items: Vec<Product> = products
        .iter()
        .filter(|p| needle.as_deref().map_or(true, |n| p.matches_text(n)))
        .filter(|p| range.contains(&p.effective_price()))
        .filter(|p| !spec.in_stock_only || p.is_in_stock())
        .cloned()
        .collect();

    match spec.sort {
        SortOption::Newest => items.sort_by_key(|p| Reverse(p.created_at)),
        SortOption::PriceAsc => items.sort_by_key(|p| p.effective_price().amount_cents),
        SortOption::PriceDesc => items.sort_by_key(|p| Reverse(p.effective_price().amount_cents)),
    }

    FilterView {
        filtered_count: items.len(),
        items,
        bounds,
    }
}

/// Filter state over the current product list.
///
/// Replacing the products recomputes the price bounds and resets the
/// selected price range to them.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    products: Vec<Product>,
    spec: FilterSpec,
    bounds: PriceBounds,
    default_bounds: PriceBounds,
}

impl ProductFilter {
    /// Create an empty filter with the 0 to 100 default bounds.
    pub fn new(currency: Currency) -> Self {
        Self::with_default_bounds(PriceBounds::default_for(currency))
    }

    /// Create an empty filter with custom bounds for an empty list.
    pub fn with_default_bounds(default_bounds: PriceBounds) -> Self {
        Self {
            products: Vec::new(),
            spec: FilterSpec::for_bounds(default_bounds),
            bounds: default_bounds,
            default_bounds,
        }
    }

    /// Replace the product list.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.bounds = PriceBounds::of_or(&products, self.default_bounds);
        self.spec.min_price = self.bounds.min;
        self.spec.max_price = self.bounds.max;
        self.products = products;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.spec.search_query = query.into();
    }

    pub fn set_price_range(&mut self, range: PriceBounds) {
        self.spec.min_price = range.min;
        self.spec.max_price = range.max;
    }

    pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
        self.spec.in_stock_only = in_stock_only;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.spec.sort = sort;
    }

    /// Restore the price range to the bounds and clear every other criterion.
    pub fn reset_filters(&mut self) {
        self.spec = FilterSpec::for_bounds(self.bounds);
    }

    /// Current filtered view.
    pub fn view(&self) -> FilterView {
        view_with_bounds(&self.products, &self.spec, self.bounds)
    }
}
