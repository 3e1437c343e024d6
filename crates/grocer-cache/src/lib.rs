//! Type-safe key-value storage for the Grocer storefront.
//!
//! Values are stored as JSON under namespaced keys, the same way a browser
//! keeps client state in local storage. The storefront keeps its cart here
//! so a reload reconstructs the same cart.
//!
//! # Example
//!
//! ```rust
//! use grocer_cache::Cache;
//!
//! let cache = Cache::open("storefront");
//! cache.set("cart", &vec!["apples", "pears"]).unwrap();
//!
//! let cart: Option<Vec<String>> = cache.get("cart").unwrap();
//! assert_eq!(cart.map(|c| c.len()), Some(2));
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
