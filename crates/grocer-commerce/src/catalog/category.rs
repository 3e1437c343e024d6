//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Id of the presentation-only category that lists every product on sale.
///
/// It is never stored; product queries translate it into an on-sale filter.
pub const SPECIALS_CATEGORY_ID: &str = "specials";

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category image URL.
    pub image_url: Option<String>,
    /// Display position, ascending.
    pub sort_order: i32,
    /// Whether the category is shown in the storefront.
    pub is_visible: bool,
}

impl Category {
    /// Create a new visible category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            sort_order,
            is_visible: true,
        }
    }

    /// Check if an id refers to the specials pseudo-category.
    pub fn is_specials(id: &CategoryId) -> bool {
        id.as_str() == SPECIALS_CATEGORY_ID
    }

    /// Visible categories in display order (sort order, then name).
    pub fn visible_sorted(categories: &[Category]) -> Vec<&Category> {
        let mut visible: Vec<&Category> = categories.iter().filter(|c| c.is_visible).collect();
        visible.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        visible
    }
}
