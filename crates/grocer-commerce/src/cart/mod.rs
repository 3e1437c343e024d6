//! Shopping cart module.
//!
//! Contains the cart aggregate, its persistence port and the service that
//! keeps the two in step.

mod cart;
mod storage;
mod store;

pub use cart::{Cart, CartItem};
pub use storage::{CartStorage, KvCartStorage, MemoryCartStorage, DEFAULT_CART_KEY};
pub use store::CartStore;
