//! Product catalog module.
//!
//! Contains types for products, unit types and categories.

mod category;
mod product;

pub use category::{Category, SPECIALS_CATEGORY_ID};
pub use product::{Product, UnitType};
