//! Store contract tests, run against both backends

use super::*;
use crate::db::DbService;
use chrono::{DateTime, TimeZone, Utc};
use shared::error::ErrorCode;
use shared::models::{OrderPatch, OrderStatus};

async fn stores() -> Vec<(&'static str, Box<dyn EntityStore>)> {
    let db = DbService::in_memory().await.unwrap();
    vec![
        ("memory", Box::new(MemoryStore::new())),
        ("sqlite", Box::new(SqliteStore::new(db.pool))),
    ]
}

fn at(date: &str, hour: u32) -> DateTime<Utc> {
    let day: NaiveDate = date.parse().unwrap();
    Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
}

fn customer(name: &str, phone: &str) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        phone: phone.to_string(),
        note: String::new(),
    }
}

fn apply(patch: OrderPatch) -> impl Fn(&mut Order) -> AppResult<()> + Send + Sync {
    move |o: &mut Order| {
        patch.apply(o);
        Ok(())
    }
}

fn order(customer_id: i64, weight: f64, price: f64, created_at: DateTime<Utc>) -> NewOrder {
    NewOrder {
        customer_id,
        weight,
        price_per_kg: price,
        due_date: None,
        note: String::new(),
        created_at,
    }
}

#[tokio::test]
async fn test_customer_insert_and_search() {
    for (name, store) in stores().await {
        let budi = store.insert_customer(customer("Budi", "08123")).await.unwrap();
        let sari = store.insert_customer(customer("Sari", "08999")).await.unwrap();
        assert!(sari.id > budi.id, "{name}");

        let found = store.get_customer(budi.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Budi", "{name}");
        assert_eq!(found.phone, "08123", "{name}");
        assert!(store.get_customer(999).await.unwrap().is_none(), "{name}");

        let all = store.scan_customers(&CustomerQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2, "{name}");

        let by_name = store
            .scan_customers(&CustomerQuery {
                search: Some("bud".into()),
                limit: Some(100),
            })
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1, "{name}");
        assert_eq!(by_name[0].id, budi.id, "{name}");

        let by_phone = store
            .scan_customers(&CustomerQuery {
                search: Some("0899".into()),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(by_phone.len(), 1, "{name}");
        assert_eq!(by_phone[0].name, "Sari", "{name}");
    }
}

#[tokio::test]
async fn test_order_insert_requires_customer() {
    for (name, store) in stores().await {
        let result = store.insert_order(order(42, 1.0, 1.0, Utc::now())).await;
        assert!(result.is_err(), "{name}");
    }
}

#[tokio::test]
async fn test_order_scan_filters() {
    for (name, store) in stores().await {
        let budi = store.insert_customer(customer("Budi", "08123")).await.unwrap();
        let sari = store.insert_customer(customer("Sari", "08999")).await.unwrap();

        let first = store
            .insert_order(order(budi.id, 2.5, 12000.0, at("2024-05-01", 9)))
            .await
            .unwrap();
        let second = store
            .insert_order(order(sari.id, 1.0, 20000.0, at("2024-05-01", 15)))
            .await
            .unwrap();
        let third = store
            .insert_order(order(budi.id, 3.0, 10000.0, at("2024-05-03", 8)))
            .await
            .unwrap();
        assert_eq!(first.total, 30000.0, "{name}");

        let newest = store.scan_orders(&OrderQuery::default()).await.unwrap();
        let ids: Vec<i64> = newest.iter().map(|o| o.order.id).collect();
        assert_eq!(ids, [third.id, second.id, first.id], "{name}");
        assert_eq!(newest[0].customer_name.as_deref(), Some("Budi"), "{name}");

        let day = store
            .scan_orders(&OrderQuery {
                created: Some(DateRange::day("2024-05-01".parse().unwrap())),
                sort: SortOrder::OldestFirst,
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<i64> = day.iter().map(|o| o.order.id).collect();
        assert_eq!(ids, [first.id, second.id], "{name}");

        let range = store
            .scan_orders(&OrderQuery {
                created: Some(DateRange {
                    start: "2024-05-02".parse().unwrap(),
                    end: "2024-05-03".parse().unwrap(),
                }),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(range.len(), 1, "{name}");
        assert_eq!(range[0].order.id, third.id, "{name}");

        let by_customer = store
            .scan_orders(&OrderQuery {
                search: Some("budi".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_customer.len(), 2, "{name}");

        let by_id = store
            .scan_orders(&OrderQuery {
                search: Some(second.id.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(by_id.iter().any(|o| o.order.id == second.id), "{name}");

        let limited = store
            .scan_orders(&OrderQuery {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 2, "{name}");
    }
}

#[tokio::test]
async fn test_order_scan_status() {
    for (name, store) in stores().await {
        let budi = store.insert_customer(customer("Budi", "08123")).await.unwrap();
        let a = store
            .insert_order(order(budi.id, 1.0, 1.0, Utc::now()))
            .await
            .unwrap();
        store
            .insert_order(order(budi.id, 1.0, 1.0, Utc::now()))
            .await
            .unwrap();

        let patch = OrderPatch {
            status: Some(OrderStatus::Done),
            ..Default::default()
        };
        let mutate = apply(patch);
        store.update_order(a.id, &mutate).await.unwrap().unwrap();

        let done = store
            .scan_orders(&OrderQuery {
                status: Some(OrderStatus::Done),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(done.len(), 1, "{name}");
        assert_eq!(done[0].order.id, a.id, "{name}");
    }
}

#[tokio::test]
async fn test_order_update_before_after() {
    for (name, store) in stores().await {
        let budi = store.insert_customer(customer("Budi", "08123")).await.unwrap();
        let created = store
            .insert_order(order(budi.id, 2.5, 12000.0, Utc::now()))
            .await
            .unwrap();

        let patch = OrderPatch {
            weight: Some(4.0),
            status: Some(OrderStatus::Processing),
            ..Default::default()
        };
        let mutate = apply(patch);
        let updated = store
            .update_order(created.id, &mutate)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.before.status, OrderStatus::Received, "{name}");
        assert_eq!(updated.after.status, OrderStatus::Processing, "{name}");
        assert_eq!(updated.after.total, 48000.0, "{name}");

        let stored = store.get_order(created.id).await.unwrap().unwrap();
        assert_eq!(stored.order, updated.after, "{name}");

        let missing = store.update_order(999, &mutate).await.unwrap();
        assert!(missing.is_none(), "{name}");
    }
}

#[tokio::test]
async fn test_search_is_literal_and_folds_unicode() {
    for (name, store) in stores().await {
        store.insert_customer(customer("Budi", "08123")).await.unwrap();
        store.insert_customer(customer("Sari", "0899")).await.unwrap();
        store.insert_customer(customer("Éka", "")).await.unwrap();
        let dewi = store.insert_customer(customer("Dewi", "10%")).await.unwrap();

        let search = |q: &str| CustomerQuery {
            search: Some(q.into()),
            limit: None,
        };
        let found = store.scan_customers(&search("%")).await.unwrap();
        assert_eq!(found.len(), 1, "{name}");
        assert_eq!(found[0].id, dewi.id, "{name}");
        assert!(store.scan_customers(&search("_")).await.unwrap().is_empty(), "{name}");
        assert!(store.scan_customers(&search("Bu_i")).await.unwrap().is_empty(), "{name}");

        for q in ["éka", "ÉKA"] {
            let found = store.scan_customers(&search(q)).await.unwrap();
            assert_eq!(found.len(), 1, "{name} {q}");
            assert_eq!(found[0].name, "Éka", "{name} {q}");
        }

        let dewi_order = store
            .insert_order(order(dewi.id, 1.0, 1.0, Utc::now()))
            .await
            .unwrap();
        let orders = store
            .scan_orders(&OrderQuery {
                search: Some("%".into()),
                ..OrderQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(orders.len(), 1, "{name}");
        assert_eq!(orders[0].order.id, dewi_order.id, "{name}");
    }
}

#[tokio::test]
async fn test_order_update_rejected_writes_nothing() {
    for (name, store) in stores().await {
        let budi = store.insert_customer(customer("Budi", "08123")).await.unwrap();
        let created = store
            .insert_order(order(budi.id, 2.5, 12000.0, Utc::now()))
            .await
            .unwrap();

        let mutate = |o: &mut Order| {
            o.weight = 99.0;
            o.status = OrderStatus::Picked;
            Err(AppError::new(ErrorCode::OrderInvalidAmount))
        };
        let result = store.update_order(created.id, &mutate).await;
        assert!(matches!(result, Err(StoreError::Rejected(_))), "{name}");

        let stored = store.get_order(created.id).await.unwrap().unwrap();
        assert_eq!(stored.order, created, "{name}");
    }
}

#[tokio::test]
async fn test_notifications_read_flags() {
    for (name, store) in stores().await {
        let first = store
            .insert_notification(NotificationCreate {
                kind: "order".into(),
                message: "one".into(),
                order_id: None,
            })
            .await
            .unwrap();
        let second = store
            .insert_notification(NotificationCreate {
                kind: "order".into(),
                message: "two".into(),
                order_id: None,
            })
            .await
            .unwrap();
        assert!(!first.read, "{name}");

        let unread = NotificationQuery {
            unread_only: true,
            limit: Some(100),
        };
        let listed = store.scan_notifications(&unread).await.unwrap();
        assert_eq!(listed.len(), 2, "{name}");
        assert_eq!(listed[0].id, second.id, "{name}");

        assert!(store.mark_notification_read(first.id).await.unwrap(), "{name}");
        assert!(store.mark_notification_read(first.id).await.unwrap(), "{name}");
        assert!(!store.mark_notification_read(999).await.unwrap(), "{name}");

        let listed = store.scan_notifications(&unread).await.unwrap();
        assert_eq!(listed.len(), 1, "{name}");

        assert_eq!(store.mark_all_notifications_read().await.unwrap(), 1, "{name}");
        assert_eq!(store.mark_all_notifications_read().await.unwrap(), 0, "{name}");
        assert!(store.scan_notifications(&unread).await.unwrap().is_empty(), "{name}");

        let all = store
            .scan_notifications(&NotificationQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2, "{name}");
        assert!(all.iter().all(|n| n.read), "{name}");
    }
}

#[tokio::test]
async fn test_settings() {
    for (name, store) in stores().await {
        assert!(store.settings().await.unwrap().is_empty(), "{name}");
        assert!(store.insert_setting_if_absent("price_per_kg", "12000").await.unwrap(), "{name}");
        assert!(!store.insert_setting_if_absent("price_per_kg", "1").await.unwrap(), "{name}");

        store.put_setting("price_per_kg", "15000").await.unwrap();
        let settings = store.settings().await.unwrap();
        assert_eq!(settings.get("price_per_kg").map(String::as_str), Some("15000"), "{name}");
    }
}
