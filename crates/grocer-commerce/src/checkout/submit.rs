//! Order submission.

use crate::cart::{CartItem, CartStorage, CartStore};
use crate::checkout::{CheckoutRequest, Order, OrderNumber, OrderStatus, TimeSlot};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;
use crate::store::{
    record_id, Collection, DataStore, DeliveryWindowRecord, FulfillmentDetails,
    NewOrderItemRecord, NewOrderRecord,
};
use chrono::Utc;
use serde_json::{json, Value};

/// Result of a confirmed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The created order.
    pub order: Order,
    /// Number of order lines written.
    pub line_count: usize,
}

impl CheckoutReceipt {
    pub fn order_id(&self) -> &OrderId {
        &self.order.id
    }

    pub fn order_number(&self) -> &OrderNumber {
        &self.order.order_number
    }

    pub fn total_estimated(&self) -> Money {
        self.order.total_price_estimated
    }
}

/// Build the `orders` payload.
pub fn build_order_record(
    request: &CheckoutRequest,
    order_number: &OrderNumber,
    total: Money,
) -> NewOrderRecord {
    let fulfillment = &request.fulfillment;
    NewOrderRecord {
        customer_name: request.customer.name.trim().to_string(),
        customer_phone: request.customer.phone.trim().to_string(),
        customer_email: request.customer.email.clone(),
        status: OrderStatus::Pending,
        fulfillment_method: fulfillment.method(),
        delivery_details: FulfillmentDetails {
            order_number: order_number.to_string(),
            address: fulfillment.address().cloned(),
            contact_phone: request.customer.phone.trim().to_string(),
            note: fulfillment.note().map(str::to_string),
        },
        payment_method: request.payment_method,
        delivery_window: DeliveryWindowRecord::from(&request.delivery_window),
        total_price_estimated: total.to_decimal(),
    }
}

/// Build the `order_items` payloads, one per cart item.
///
/// Each line is priced at the product's effective price when ordered.
pub fn build_item_records(
    order_id: &OrderId,
    items: &[CartItem],
) -> Result<Vec<NewOrderItemRecord>, CommerceError> {
    items
        .iter()
        .map(|item| {
            Ok(NewOrderItemRecord {
                order_id: order_id.clone(),
                product_id: item.product.id.clone(),
                product_name: item.product.name.clone(),
                unit_type: item.product.unit_type,
                quantity_ordered: item.quantity,
                price_at_order: item.product.effective_price().to_decimal(),
                total_item_price: item.line_total()?.to_decimal(),
            })
        })
        .collect()
}

/// Turn the cart into an order.
///
/// The chosen slot must be one of `offered_slots`. The order is written
/// first and its items only once the order id is known. The cart is emptied only after both writes succeed. If the items
/// cannot be written the order is marked cancelled so it does not linger as
/// an empty pending order.
#[tracing::instrument(skip_all, fields(lines = cart.items().len()))]
pub async fn submit_order<S, D>(
    cart: &mut CartStore<S>,
    request: &CheckoutRequest,
    offered_slots: &[TimeSlot],
    store: &D,
) -> Result<CheckoutReceipt, CommerceError>
where
    S: CartStorage,
    D: DataStore + ?Sized,
{
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    request.validate()?;
    request.validate_slot(offered_slots)?;

    let total = cart.estimated_total()?;
    let order_number = OrderNumber::generate();
    let order_record = build_order_record(request, &order_number, total);

    let inserted = store
        .insert(Collection::Orders, vec![serde_json::to_value(&order_record)?])
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "order insert failed");
            CommerceError::OrderCreationFailed(e.to_string())
        })?;

    let order_id = inserted
        .first()
        .ok_or_else(|| CommerceError::OrderCreationFailed("store returned no order".into()))
        .and_then(|row| {
            record_id(Collection::Orders, row)
                .map_err(|e| CommerceError::OrderCreationFailed(e.to_string()))
        })
        .map(OrderId::new)?;

    let item_rows = build_item_records(&order_id, cart.items())?
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;
    let line_count = item_rows.len();

    if let Err(e) = store.insert(Collection::OrderItems, item_rows).await {
        tracing::error!(error = %e, %order_id, "order items insert failed");
        let compensated = match store
            .update(
                Collection::Orders,
                order_id.as_str(),
                json!({ "status": OrderStatus::Cancelled }),
            )
            .await
        {
            Ok(()) => {
                tracing::warn!(%order_id, "orphaned order cancelled");
                true
            }
            Err(ce) => {
                tracing::warn!(error = %ce, %order_id, "could not cancel orphaned order");
                false
            }
        };
        return Err(CommerceError::OrderItemsFailed {
            order_id: order_id.into_inner(),
            message: e.to_string(),
            compensated,
        });
    }

    cart.clear();
    tracing::info!(%order_id, %order_number, total = %total, "order placed");

    Ok(CheckoutReceipt {
        order: Order {
            id: order_id,
            order_number,
            customer: request.customer.clone(),
            status: OrderStatus::Pending,
            fulfillment: request.fulfillment.clone(),
            payment_method: request.payment_method,
            delivery_window: request.delivery_window,
            total_price_estimated: total,
            total_price_final: None,
            created_at: Utc::now(),
        },
        line_count,
    })
}
