//! Order picking module.
//!
//! Tracks which ordered items were found and in what quantity, then writes
//! the result back and moves the order on to preparing.

mod session;
mod state;

pub use session::{PickLine, PickingSession, PlannedQuantity};
pub use state::PickState;
