//! Per-item picking state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where an order item stands during picking.
///
/// Every item starts `Unresolved` and becomes `Found` or `Missing`;
/// resetting returns it to `Unresolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PickState {
    #[default]
    Unresolved,
    /// Picked, with the quantity actually taken.
    Found { quantity: Decimal },
    /// Not available; nothing was taken.
    Missing,
}

impl PickState {
    /// State of an item that already carries a persisted quantity.
    pub fn from_actual(quantity_actual: Option<Decimal>) -> Self {
        match quantity_actual {
            None => PickState::Unresolved,
            Some(q) if q <= Decimal::ZERO => PickState::Missing,
            Some(quantity) => PickState::Found { quantity },
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, PickState::Unresolved)
    }

    /// Picked quantity; zero when missing, `None` while unresolved.
    pub fn quantity(&self) -> Option<Decimal> {
        match self {
            PickState::Unresolved => None,
            PickState::Found { quantity } => Some(*quantity),
            PickState::Missing => Some(Decimal::ZERO),
        }
    }
}
