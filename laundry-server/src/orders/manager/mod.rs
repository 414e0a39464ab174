//! OrderManager - order validation, mutation and event notifications
//!
//! # Update Flow
//!
//! ```text
//! update(id, payload)
//!     ├─ 1. Parse payload into a typed OrderPatch (status, amounts)
//!     ├─ 2. Store read-modify-write: apply patch, recompute total,
//!     │     reject a total that overflows (nothing is written)
//!     ├─ 3. Status changed? emit one notification (failure only logged)
//!     └─ 4. Return the order joined with its customer
//! ```

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    NewOrder, NotificationCreate, Order, OrderCreate, OrderListQuery, OrderPatch, OrderStatus,
    OrderUpdate, OrderWithCustomer,
};
use std::sync::Arc;

use crate::notifications::NotificationSink;
use crate::store::{EntityStore, OrderQuery, SortOrder};

/// Orders returned per list request
pub const LIST_LIMIT: u32 = 200;

/// Order lifecycle manager
pub struct OrderManager {
    store: Arc<dyn EntityStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for OrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderManager")
            .field("store", &"<EntityStore>")
            .field("notifier", &"<NotificationSink>")
            .finish()
    }
}

impl OrderManager {
    pub fn new(store: Arc<dyn EntityStore>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { store, notifier }
    }

    /// Create an order in status `received` and announce it
    pub async fn create(&self, data: OrderCreate) -> AppResult<OrderWithCustomer> {
        let customer_id = data
            .customer_id
            .ok_or_else(|| AppError::new(ErrorCode::OrderCustomerRequired))?;
        check_amount("weight", data.weight)?;
        check_amount("price_per_kg", data.price_per_kg)?;
        check_total(data.weight, data.price_per_kg)?;

        let customer = self.store.get_customer(customer_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CustomerNotFound,
                format!("Customer {customer_id} not found"),
            )
        })?;

        let order = self
            .store
            .insert_order(NewOrder {
                customer_id,
                weight: data.weight,
                price_per_kg: data.price_per_kg,
                due_date: data.due_date,
                note: data.note.unwrap_or_default(),
                created_at: shared::util::now_utc(),
            })
            .await?;

        tracing::info!(
            order_id = order.id,
            customer_id,
            total = order.total,
            "Order created"
        );

        self.notify(NotificationCreate::order(
            order.id,
            format!("Order #{} created for {}", order.id, customer.name),
        ))
        .await;

        Ok(OrderWithCustomer {
            order,
            customer_name: Some(customer.name),
            customer_phone: Some(customer.phone),
        })
    }

    /// Apply a partial update; `total` is always recomputed
    pub async fn update(&self, id: i64, data: OrderUpdate) -> AppResult<OrderWithCustomer> {
        let patch = parse_patch(data)?;
        let mutate = move |order: &mut Order| {
            patch.apply(order);
            check_total(order.weight, order.price_per_kg)
        };

        let updated = self
            .store
            .update_order(id, &mutate)
            .await?
            .ok_or_else(|| order_not_found(id))?;

        let (old, new) = (updated.before.status, updated.after.status);
        tracing::info!(
            order_id = id,
            status = %new,
            total = updated.after.total,
            "Order updated"
        );

        if old != new {
            self.notify(NotificationCreate::order(
                id,
                format!("Order #{id} status: {old} → {new}"),
            ))
            .await;
        }

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> AppResult<OrderWithCustomer> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| order_not_found(id))
    }

    /// Newest first, capped at [`LIST_LIMIT`]
    pub async fn list(&self, query: OrderListQuery) -> AppResult<Vec<OrderWithCustomer>> {
        let status = query.status.as_deref().map(parse_status).transpose()?;
        let query = OrderQuery {
            search: query.q,
            status,
            created: None,
            sort: SortOrder::NewestFirst,
            limit: Some(LIST_LIMIT),
        };
        Ok(self.store.scan_orders(&query).await?)
    }

    /// Best-effort notification; a failure never reaches the caller
    async fn notify(&self, data: NotificationCreate) {
        let order_id = data.order_id;
        if let Err(e) = self.notifier.emit(data).await {
            tracing::warn!(order_id = ?order_id, error = %e, "Failed to emit order notification");
        }
    }
}

fn order_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}

fn check_amount(field: &str, value: f64) -> AppResult<()> {
    if value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::OrderInvalidAmount,
            format!("{field} must not be negative"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// `weight * price_per_kg` must stay a finite number
fn check_total(weight: f64, price_per_kg: f64) -> AppResult<()> {
    let total = Order::compute_total(weight, price_per_kg);
    if !total.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::OrderInvalidAmount,
            "weight * price_per_kg is out of range",
        )
        .with_detail("field", "total"));
    }
    Ok(())
}

fn parse_status(value: &str) -> AppResult<OrderStatus> {
    value.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::OrderInvalidStatus,
            format!("Unknown order status: {value}"),
        )
        .with_detail("status", value)
    })
}

fn parse_patch(data: OrderUpdate) -> AppResult<OrderPatch> {
    if let Some(weight) = data.weight {
        check_amount("weight", weight)?;
    }
    if let Some(price) = data.price_per_kg {
        check_amount("price_per_kg", price)?;
    }
    Ok(OrderPatch {
        status: data.status.as_deref().map(parse_status).transpose()?,
        weight: data.weight,
        price_per_kg: data.price_per_kg,
        note: data.note,
    })
}

#[cfg(test)]
mod tests;
