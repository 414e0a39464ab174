use super::*;
use crate::db::DbService;
use crate::notifications::NotificationEmitter;
use crate::store::{MemoryStore, SqliteStore};
use async_trait::async_trait;
use serde_json::json;
use shared::models::{CustomerCreate, Notification};

use crate::customers::CustomerService;

struct Harness {
    manager: OrderManager,
    customers: CustomerService,
    notifications: NotificationEmitter,
}

fn harness_with(store: Arc<dyn EntityStore>) -> Harness {
    let notifications = NotificationEmitter::new(store.clone());
    Harness {
        manager: OrderManager::new(store.clone(), Arc::new(notifications.clone())),
        customers: CustomerService::new(store),
        notifications,
    }
}

fn create_test_harness() -> Harness {
    harness_with(Arc::new(MemoryStore::new()))
}

async fn create_sqlite_harness() -> Harness {
    let db = DbService::in_memory().await.unwrap();
    harness_with(Arc::new(SqliteStore::new(db.pool)))
}

async fn add_customer(h: &Harness, name: &str, phone: &str) -> i64 {
    h.customers
        .create(CustomerCreate {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            note: None,
        })
        .await
        .unwrap()
        .id
}

fn create_payload(value: serde_json::Value) -> OrderCreate {
    serde_json::from_value(value).unwrap()
}

fn update_payload(value: serde_json::Value) -> OrderUpdate {
    serde_json::from_value(value).unwrap()
}

/// Sink that always fails, to prove order writes survive it
struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn emit(&self, _data: NotificationCreate) -> AppResult<Notification> {
        Err(AppError::database("notification table unavailable"))
    }
}

// ========================================================================
// Create
// ========================================================================

async fn run_budi_scenario(h: &Harness) {
    let budi = add_customer(h, "Budi", "08123").await;
    let created = h
        .manager
        .create(create_payload(json!({
            "customer_id": budi,
            "weight": 2.5,
            "price_per_kg": 12000
        })))
        .await
        .unwrap();

    assert_eq!(created.order.total, 30000.0);
    assert_eq!(created.order.status, OrderStatus::Received);
    assert_eq!(created.customer_name.as_deref(), Some("Budi"));

    let unread = h.notifications.list_unread().await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].kind, "order");
    assert_eq!(unread[0].order_id, Some(created.order.id));
    assert!(unread[0].message.contains(&format!("#{}", created.order.id)));
    assert!(unread[0].message.contains("Budi"));

    let done = h
        .manager
        .update(created.order.id, update_payload(json!({"status": "done"})))
        .await
        .unwrap();
    assert_eq!(done.order.status, OrderStatus::Done);
    assert_eq!(done.order.total, 30000.0);

    let unread = h.notifications.list_unread().await.unwrap();
    assert_eq!(unread.len(), 2);
    assert!(unread[0].message.contains("received → done"));
    assert_eq!(
        unread[0].message,
        format!("Order #{} status: received → done", created.order.id)
    );
}

#[tokio::test]
async fn test_budi_scenario_memory() {
    run_budi_scenario(&create_test_harness()).await;
}

#[tokio::test]
async fn test_budi_scenario_sqlite() {
    run_budi_scenario(&create_sqlite_harness().await).await;
}

#[tokio::test]
async fn test_create_coerces_amounts() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;

    let created = h
        .manager
        .create(create_payload(json!({
            "customer_id": budi.to_string(),
            "weight": "3",
            "price_per_kg": "not a number"
        })))
        .await
        .unwrap();
    assert_eq!(created.order.weight, 3.0);
    assert_eq!(created.order.price_per_kg, 0.0);
    assert_eq!(created.order.total, 0.0);

    let defaults = h
        .manager
        .create(create_payload(json!({"customer_id": budi})))
        .await
        .unwrap();
    assert_eq!(defaults.order.weight, 0.0);
    assert_eq!(defaults.order.total, 0.0);
    assert_eq!(defaults.order.note, "");
}

#[tokio::test]
async fn test_create_requires_customer() {
    let h = create_test_harness();
    for payload in [
        json!({"weight": 1}),
        json!({"customer_id": null, "weight": 1}),
        json!({"customer_id": "", "weight": 1}),
        json!({"customer_id": 0, "weight": 1}),
    ] {
        let err = h.manager.create(create_payload(payload)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderCustomerRequired);
        assert_eq!(err.message, "customer_id required");
    }
    assert!(h.notifications.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_unknown_customer() {
    let h = create_test_harness();
    let err = h
        .manager
        .create(create_payload(json!({"customer_id": 77, "weight": 1})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CustomerNotFound);
}

#[tokio::test]
async fn test_create_rejects_negative_amounts() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;
    let err = h
        .manager
        .create(create_payload(json!({"customer_id": budi, "weight": -1, "price_per_kg": 5})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidAmount);

    let err = h
        .manager
        .create(create_payload(json!({"customer_id": budi, "weight": 1, "price_per_kg": "-5"})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidAmount);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_create() {
    let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
    let customers = CustomerService::new(store.clone());
    let manager = OrderManager::new(store.clone(), Arc::new(FailingSink));

    let budi = customers
        .create(CustomerCreate {
            name: Some("Budi".into()),
            phone: None,
            note: None,
        })
        .await
        .unwrap();

    let created = manager
        .create(create_payload(json!({"customer_id": budi.id, "weight": 1, "price_per_kg": 10})))
        .await
        .unwrap();
    assert_eq!(created.order.total, 10.0);

    let updated = manager
        .update(created.order.id, update_payload(json!({"status": "picked"})))
        .await
        .unwrap();
    assert_eq!(updated.order.status, OrderStatus::Picked);
}

// ========================================================================
// Update
// ========================================================================

#[tokio::test]
async fn test_same_status_emits_nothing() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;
    let created = h
        .manager
        .create(create_payload(json!({"customer_id": budi, "weight": 1, "price_per_kg": 1})))
        .await
        .unwrap();

    h.manager
        .update(created.order.id, update_payload(json!({"status": "received"})))
        .await
        .unwrap();
    h.manager
        .update(created.order.id, update_payload(json!({"weight": 2})))
        .await
        .unwrap();

    assert_eq!(h.notifications.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_any_status_transition_allowed() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;
    let id = h
        .manager
        .create(create_payload(json!({"customer_id": budi})))
        .await
        .unwrap()
        .order
        .id;

    for status in ["picked", "received", "done", "processing"] {
        let updated = h
            .manager
            .update(id, update_payload(json!({ "status": status })))
            .await
            .unwrap();
        assert_eq!(updated.order.status.as_str(), status);
    }
    // create + four changes
    assert_eq!(h.notifications.list_all().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_update_recomputes_total() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;
    let id = h
        .manager
        .create(create_payload(
            json!({"customer_id": budi, "weight": 2.5, "price_per_kg": 12000, "note": "fold"}),
        ))
        .await
        .unwrap()
        .order
        .id;

    let updated = h
        .manager
        .update(id, update_payload(json!({"weight": "4"})))
        .await
        .unwrap();
    assert_eq!(updated.order.total, 48000.0);
    assert_eq!(updated.order.note, "fold");

    let updated = h
        .manager
        .update(id, update_payload(json!({"price_per_kg": 10000, "note": null})))
        .await
        .unwrap();
    assert_eq!(updated.order.weight, 4.0);
    assert_eq!(updated.order.total, 40000.0);
    assert_eq!(updated.order.note, "");

    let updated = h
        .manager
        .update(id, update_payload(json!({"note": "express"})))
        .await
        .unwrap();
    assert_eq!(updated.order.note, "express");
    assert_eq!(updated.order.total, 40000.0);
}

#[tokio::test]
async fn test_update_errors() {
    let h = create_test_harness();
    let err = h
        .manager
        .update(9, update_payload(json!({"status": "done"})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);

    let budi = add_customer(&h, "Budi", "08123").await;
    let id = h
        .manager
        .create(create_payload(json!({"customer_id": budi, "weight": 1, "price_per_kg": 1})))
        .await
        .unwrap()
        .order
        .id;

    let err = h
        .manager
        .update(id, update_payload(json!({"status": "washing"})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidStatus);

    let err = h
        .manager
        .update(id, update_payload(json!({"weight": -2})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidAmount);

    // rejected patches leave the order untouched
    let order = h.manager.get(id).await.unwrap();
    assert_eq!(order.order.status, OrderStatus::Received);
    assert_eq!(order.order.weight, 1.0);
}

async fn run_overflowing_total(h: &Harness) {
    let budi = add_customer(h, "Budi", "08123").await;
    let err = h
        .manager
        .create(create_payload(
            json!({"customer_id": budi, "weight": 1e300, "price_per_kg": 1e300}),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidAmount);
    assert!(h.manager.list(OrderListQuery::default()).await.unwrap().is_empty());

    let created = h
        .manager
        .create(create_payload(json!({"customer_id": budi, "weight": 0, "price_per_kg": 1e200})))
        .await
        .unwrap();
    assert_eq!(created.order.total, 0.0);

    let err = h
        .manager
        .update(created.order.id, update_payload(json!({"weight": 1e200, "status": "done"})))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidAmount);

    let stored = h.manager.get(created.order.id).await.unwrap();
    assert_eq!(stored.order, created.order);
    // only the creation notification exists
    assert_eq!(h.notifications.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_overflowing_total_rejected_memory() {
    run_overflowing_total(&create_test_harness()).await;
}

#[tokio::test]
async fn test_overflowing_total_rejected_sqlite() {
    run_overflowing_total(&create_sqlite_harness().await).await;
}

// ========================================================================
// List
// ========================================================================

#[tokio::test]
async fn test_list_filters() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;
    let sari = add_customer(&h, "Sari", "08999").await;

    let first = h
        .manager
        .create(create_payload(json!({"customer_id": budi, "weight": 1, "price_per_kg": 1})))
        .await
        .unwrap();
    let second = h
        .manager
        .create(create_payload(json!({"customer_id": sari, "weight": 1, "price_per_kg": 1})))
        .await
        .unwrap();
    h.manager
        .update(second.order.id, update_payload(json!({"status": "done"})))
        .await
        .unwrap();

    let all = h.manager.list(OrderListQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let done = h
        .manager
        .list(OrderListQuery {
            q: None,
            status: Some("done".into()),
        })
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].order.id, second.order.id);

    let by_name = h
        .manager
        .list(OrderListQuery {
            q: Some("budi".into()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].order.id, first.order.id);

    let err = h
        .manager
        .list(OrderListQuery {
            q: None,
            status: Some("lost".into()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderInvalidStatus);
}

#[tokio::test]
async fn test_list_capped() {
    let h = create_test_harness();
    let budi = add_customer(&h, "Budi", "08123").await;
    let mut last = 0;
    for _ in 0..LIST_LIMIT + 1 {
        last = h
            .manager
            .create(create_payload(json!({"customer_id": budi, "weight": 1, "price_per_kg": 1})))
            .await
            .unwrap()
            .order
            .id;
    }

    let all = h.manager.list(OrderListQuery::default()).await.unwrap();
    assert_eq!(all.len(), LIST_LIMIT as usize);
    assert_eq!(all[0].order.id, last);
}
