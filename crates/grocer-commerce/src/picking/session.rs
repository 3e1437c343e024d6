//! Picking session for one order.

use crate::checkout::{OrderItem, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId};
use crate::money::{Currency, Money};
use crate::picking::PickState;
use crate::store::{
    load_order_items, Collection, DataStore, PickedQuantityPatch, PickingCompletePatch,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order item with its picking state.
#[derive(Debug, Clone, PartialEq)]
pub struct PickLine {
    pub item: OrderItem,
    pub state: PickState,
}

impl PickLine {
    /// Quantity to persist.
    ///
    /// Unresolved lines fall back to the ordered quantity; a commit never
    /// reaches them because it requires every line to be resolved.
    pub fn planned_quantity(&self) -> Decimal {
        self.state.quantity().unwrap_or(self.item.quantity_ordered)
    }

    /// Move to `state`, keeping the item's actual quantity in step:
    /// zero when missing, the picked quantity when found, unset otherwise.
    fn set_state(&mut self, state: PickState) {
        self.state = state;
        self.item.quantity_actual = state.quantity();
    }
}

/// Quantity to write for one order item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedQuantity {
    pub item_id: OrderItemId,
    pub quantity: Decimal,
}

/// An operator's pass over an order, confirming what was picked.
#[derive(Debug, Clone)]
pub struct PickingSession {
    order_id: OrderId,
    currency: Currency,
    lines: Vec<PickLine>,
}

impl PickingSession {
    /// Start picking the given items.
    ///
    /// Items that already carry an actual quantity start resolved, so a
    /// reopened session shows earlier progress.
    pub fn new(order_id: OrderId, currency: Currency, items: Vec<OrderItem>) -> Self {
        let lines = items
            .into_iter()
            .map(|item| {
                let mut line = PickLine {
                    state: PickState::Unresolved,
                    item,
                };
                line.set_state(PickState::from_actual(line.item.quantity_actual));
                line
            })
            .collect();
        Self {
            order_id,
            currency,
            lines,
        }
    }

    /// Load an order's items from the store and start picking them.
    pub async fn load<D: DataStore + ?Sized>(
        store: &D,
        order_id: OrderId,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let items = load_order_items(store, &order_id, currency).await?;
        Ok(Self::new(order_id, currency, items))
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn lines(&self) -> &[PickLine] {
        &self.lines
    }

    /// Picking state of an item.
    pub fn state(&self, item_id: &OrderItemId) -> Option<PickState> {
        self.lines
            .iter()
            .find(|l| &l.item.id == item_id)
            .map(|l| l.state)
    }

    fn line_mut(&mut self, item_id: &OrderItemId) -> Result<&mut PickLine, CommerceError> {
        self.lines
            .iter_mut()
            .find(|l| &l.item.id == item_id)
            .ok_or_else(|| CommerceError::OrderItemNotFound(item_id.to_string()))
    }

    /// Mark an item as unavailable.
    pub fn mark_missing(&mut self, item_id: &OrderItemId) -> Result<(), CommerceError> {
        self.line_mut(item_id)?.set_state(PickState::Missing);
        Ok(())
    }

    /// Mark an item as picked in full.
    ///
    /// Weighed items need their actual weight instead; see
    /// [`PickingSession::set_actual_quantity`].
    pub fn mark_found(&mut self, item_id: &OrderItemId) -> Result<(), CommerceError> {
        let line = self.line_mut(item_id)?;
        if line.item.is_weighted() {
            return Err(CommerceError::WeightRequired(line.item.product_name.clone()));
        }
        let quantity = line.item.quantity_ordered;
        line.set_state(PickState::Found { quantity });
        Ok(())
    }

    /// Record the quantity actually picked.
    ///
    /// The quantity must be positive; use [`PickingSession::mark_missing`]
    /// for items that were not picked at all.
    pub fn set_actual_quantity(
        &mut self,
        item_id: &OrderItemId,
        quantity: Decimal,
    ) -> Result<(), CommerceError> {
        if quantity <= Decimal::ZERO {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        self.line_mut(item_id)?.set_state(PickState::Found { quantity });
        Ok(())
    }

    /// Return an item to unresolved.
    pub fn reset(&mut self, item_id: &OrderItemId) -> Result<(), CommerceError> {
        self.line_mut(item_id)?.set_state(PickState::Unresolved);
        Ok(())
    }

    pub fn unresolved_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.state.is_resolved()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved_count() == 0
    }

    /// Quantities to write, one per item.
    ///
    /// Fails while any item is unresolved.
    pub fn commit_plan(&self) -> Result<Vec<PlannedQuantity>, CommerceError> {
        let remaining = self.unresolved_count();
        if remaining > 0 {
            return Err(CommerceError::PickingIncomplete { remaining });
        }

        Ok(self
            .lines
            .iter()
            .map(|l| PlannedQuantity {
                item_id: l.item.id.clone(),
                quantity: l.planned_quantity(),
            })
            .collect())
    }

    /// Order total over the picked quantities at order-time prices.
    pub fn final_total(&self) -> Result<Money, CommerceError> {
        let lines = self
            .lines
            .iter()
            .map(|l| {
                l.item
                    .price_at_order
                    .try_multiply(l.planned_quantity())
                    .ok_or(CommerceError::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Money::try_sum(lines.iter(), self.currency).ok_or(CommerceError::Overflow)
    }

    /// Write the picked quantities and move the order to preparing.
    ///
    /// Every item write is attempted. If any fails the order status is left
    /// as it was and the failing item ids are returned in the error; a retry
    /// writes every item again. Returns the final total on success.
    #[tracing::instrument(skip_all, fields(order_id = %self.order_id, lines = self.lines.len()))]
    pub async fn commit<D: DataStore + ?Sized>(&mut self, store: &D) -> Result<Money, CommerceError> {
        let plan = self.commit_plan()?;
        let total = self.final_total()?;

        let mut failed = Vec::new();
        for planned in &plan {
            let patch = serde_json::to_value(PickedQuantityPatch {
                quantity_actual: planned.quantity,
            })?;
            if let Err(e) = store
                .update(Collection::OrderItems, planned.item_id.as_str(), patch)
                .await
            {
                tracing::warn!(item_id = %planned.item_id, error = %e, "picked quantity not saved");
                failed.push(planned.item_id.to_string());
            }
        }

        if !failed.is_empty() {
            return Err(CommerceError::PickingCommitFailed { failed });
        }

        let patch = serde_json::to_value(PickingCompletePatch {
            status: OrderStatus::Preparing,
            total_price_final: total.to_decimal(),
        })?;
        store
            .update(Collection::Orders, self.order_id.as_str(), patch)
            .await?;

        tracing::info!(total = %total, "picking committed");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitType;
    use crate::ids::ProductId;

    fn item(id: &str, unit_type: UnitType, ordered: Decimal, price: i64) -> OrderItem {
        let price_at_order = Money::from_units(price, Currency::ILS);
        OrderItem {
            id: OrderItemId::new(id),
            order_id: OrderId::new("o1"),
            product_id: ProductId::new(id),
            product_name: id.to_string(),
            unit_type,
            quantity_ordered: ordered,
            quantity_actual: None,
            price_at_order,
            total_item_price: price_at_order.try_multiply(ordered).unwrap(),
        }
    }

    fn session() -> PickingSession {
        PickingSession::new(
            OrderId::new("o1"),
            Currency::ILS,
            vec![
                item("bread", UnitType::Unit, Decimal::from(2), 10),
                item("tomatoes", UnitType::Kg, Decimal::new(15, 1), 4),
                item("milk", UnitType::Pack, Decimal::from(1), 6),
            ],
        )
    }

    fn id(s: &str) -> OrderItemId {
        OrderItemId::new(s)
    }

    #[test]
    fn test_new_session_is_unresolved() {
        let session = session();
        assert_eq!(session.unresolved_count(), 3);
        assert!(!session.is_complete());
        assert_eq!(session.state(&id("bread")), Some(PickState::Unresolved));
    }

    #[test]
    fn test_commit_plan_requires_every_item_resolved() {
        let mut session = session();
        session.mark_found(&id("bread")).unwrap();
        session.mark_missing(&id("milk")).unwrap();

        assert!(matches!(
            session.commit_plan(),
            Err(CommerceError::PickingIncomplete { remaining: 1 })
        ));
    }

    #[test]
    fn test_missing_plans_zero() {
        let mut session = session();
        session.mark_missing(&id("bread")).unwrap();
        session.set_actual_quantity(&id("tomatoes"), Decimal::new(13, 1)).unwrap();
        session.mark_found(&id("milk")).unwrap();

        let plan = session.commit_plan().unwrap();
        assert_eq!(plan[0].quantity, Decimal::ZERO);
        assert_eq!(plan[1].quantity, Decimal::new(13, 1));
        assert_eq!(plan[2].quantity, Decimal::from(1));
    }

    #[test]
    fn test_weighed_items_need_a_weight() {
        let mut session = session();
        assert!(matches!(
            session.mark_found(&id("tomatoes")),
            Err(CommerceError::WeightRequired(_))
        ));
        assert_eq!(session.state(&id("tomatoes")), Some(PickState::Unresolved));
    }

    #[test]
    fn test_actual_quantity_must_be_positive() {
        let mut session = session();
        assert!(matches!(
            session.set_actual_quantity(&id("bread"), Decimal::ZERO),
            Err(CommerceError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_reset_returns_to_unresolved() {
        let mut session = session();
        session.mark_missing(&id("bread")).unwrap();
        session.reset(&id("bread")).unwrap();
        assert_eq!(session.state(&id("bread")), Some(PickState::Unresolved));
        assert_eq!(session.unresolved_count(), 3);
    }

    #[test]
    fn test_actual_quantity_follows_state() {
        let mut session = session();
        let actual = |s: &PickingSession| s.lines()[0].item.quantity_actual;

        session.mark_missing(&id("bread")).unwrap();
        assert_eq!(actual(&session), Some(Decimal::ZERO));

        session.mark_found(&id("bread")).unwrap();
        assert_eq!(actual(&session), Some(Decimal::from(2)));

        session.set_actual_quantity(&id("bread"), Decimal::ONE).unwrap();
        assert_eq!(actual(&session), Some(Decimal::ONE));

        session.reset(&id("bread")).unwrap();
        assert_eq!(actual(&session), None);
    }

    #[tokio::test]
    async fn test_reset_after_commit_clears_actual_quantity() {
        use crate::store::InMemoryStore;
        use serde_json::json;

        let store = InMemoryStore::new();
        store
            .insert(Collection::Orders, vec![json!({"id": "o1", "status": "pending"})])
            .await
            .unwrap();
        store
            .insert(Collection::OrderItems, vec![json!({"id": "bread", "order_id": "o1"})])
            .await
            .unwrap();

        let mut session = PickingSession::new(
            OrderId::new("o1"),
            Currency::ILS,
            vec![item("bread", UnitType::Unit, Decimal::ONE, 10)],
        );
        session.mark_missing(&id("bread")).unwrap();
        session.commit(&store).await.unwrap();
        assert_eq!(session.lines()[0].item.quantity_actual, Some(Decimal::ZERO));

        session.reset(&id("bread")).unwrap();
        assert_eq!(session.state(&id("bread")), Some(PickState::Unresolved));
        assert_eq!(session.lines()[0].item.quantity_actual, None);
    }

    #[test]
    fn test_unknown_item() {
        let mut session = session();
        assert!(matches!(
            session.mark_missing(&id("caviar")),
            Err(CommerceError::OrderItemNotFound(_))
        ));
    }

    #[test]
    fn test_final_total() {
        let mut session = session();
        session.mark_missing(&id("bread")).unwrap();
        session.set_actual_quantity(&id("tomatoes"), Decimal::new(125, 2)).unwrap();
        session.mark_found(&id("milk")).unwrap();

        // 0 x 10 + 1.25 x 4 + 1 x 6
        assert_eq!(session.final_total().unwrap(), Money::from_units(11, Currency::ILS));
    }

    #[test]
    fn test_resumes_from_persisted_quantities() {
        let mut missing = item("bread", UnitType::Unit, Decimal::from(2), 10);
        missing.quantity_actual = Some(Decimal::ZERO);
        let mut found = item("tomatoes", UnitType::Kg, Decimal::new(15, 1), 4);
        found.quantity_actual = Some(Decimal::new(14, 1));

        let session = PickingSession::new(OrderId::new("o1"), Currency::ILS, vec![missing, found]);
        assert!(session.is_complete());
        assert_eq!(session.state(&id("bread")), Some(PickState::Missing));
    }
}
