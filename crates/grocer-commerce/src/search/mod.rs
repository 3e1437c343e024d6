//! Product filter module.
//!
//! Contains the filter criteria, the pure filter/sort pipeline and the
//! stateful filter that tracks price bounds.

mod filter;
mod query;
mod results;

pub use filter::{compute_view, ProductFilter};
pub use query::{FilterSpec, SortOption};
pub use results::{FilterView, PriceBounds};
