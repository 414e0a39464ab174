//! In-memory entity store
//!
//! Process-local tables with the same semantics as the SQLite store:
//! ids start at 1 and increase, scans sort on `created_at` then id.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    Customer, NewCustomer, NewOrder, Notification, NotificationCreate, Order, OrderWithCustomer,
    Settings,
};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::{
    CustomerQuery, EntityStore, NotificationQuery, OrderMutator, OrderQuery, SortOrder,
    StoreError, StoreResult, Updated, search_key,
};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    orders: BTreeMap<i64, Order>,
    notifications: BTreeMap<i64, Notification>,
    settings: Settings,
    last_customer_id: i64,
    last_order_id: i64,
    last_notification_id: i64,
}

impl Tables {
    fn join(&self, order: &Order) -> OrderWithCustomer {
        let customer = self.customers.get(&order.customer_id);
        OrderWithCustomer {
            order: order.clone(),
            customer_name: customer.map(|c| c.name.clone()),
            customer_phone: customer.map(|c| c.phone.clone()),
        }
    }
}

/// Process-local store behind a single lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn take<T>(items: impl Iterator<Item = T>, limit: Option<u32>) -> Vec<T> {
    match limit {
        Some(n) => items.take(n as usize).collect(),
        None => items.collect(),
    }
}

fn matches_key(text: &str, needle: &str) -> bool {
    search_key(text).contains(needle)
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_customer(&self, data: NewCustomer) -> StoreResult<Customer> {
        let mut tables = self.tables.lock();
        tables.last_customer_id += 1;
        let customer = Customer {
            id: tables.last_customer_id,
            name: data.name,
            phone: data.phone,
            note: data.note,
            created_at: shared::util::now_utc(),
        };
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_customer(&self, id: i64) -> StoreResult<Option<Customer>> {
        Ok(self.tables.lock().customers.get(&id).cloned())
    }

    async fn scan_customers(&self, query: &CustomerQuery) -> StoreResult<Vec<Customer>> {
        let tables = self.tables.lock();
        let needle = query.needle();

        let mut matches: Vec<&Customer> = tables
            .customers
            .values()
            .filter(|c| match &needle {
                Some(q) => matches_key(&c.name, q) || matches_key(&c.phone, q),
                None => true,
            })
            .collect();
        matches.sort_by_key(|c| Reverse((c.created_at, c.id)));

        Ok(take(matches.into_iter().cloned(), query.limit))
    }

    async fn insert_order(&self, data: NewOrder) -> StoreResult<Order> {
        let mut tables = self.tables.lock();
        if !tables.customers.contains_key(&data.customer_id) {
            return Err(StoreError::MissingReference(format!(
                "customer {}",
                data.customer_id
            )));
        }
        tables.last_order_id += 1;
        let order = data.into_order(tables.last_order_id);
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: i64) -> StoreResult<Option<OrderWithCustomer>> {
        let tables = self.tables.lock();
        Ok(tables.orders.get(&id).map(|o| tables.join(o)))
    }

    async fn scan_orders(&self, query: &OrderQuery) -> StoreResult<Vec<OrderWithCustomer>> {
        let tables = self.tables.lock();
        let needle = query.needle();
        let search_id = query.search_id();

        let mut matches: Vec<OrderWithCustomer> = tables
            .orders
            .values()
            .filter(|o| query.status.is_none_or(|s| o.status == s))
            .filter(|o| {
                query
                    .created
                    .is_none_or(|range| range.contains(o.created_at.date_naive()))
            })
            .map(|o| tables.join(o))
            .filter(|o| match &needle {
                Some(q) => {
                    search_id == Some(o.order.id)
                        || o.customer_name.as_deref().is_some_and(|n| matches_key(n, q))
                        || o.customer_phone.as_deref().is_some_and(|p| matches_key(p, q))
                }
                None => true,
            })
            .collect();

        match query.sort {
            SortOrder::NewestFirst => {
                matches.sort_by_key(|o| Reverse((o.order.created_at, o.order.id)))
            }
            SortOrder::OldestFirst => matches.sort_by_key(|o| (o.order.created_at, o.order.id)),
        }

        Ok(take(matches.into_iter(), query.limit))
    }

    async fn update_order(
        &self,
        id: i64,
        mutate: OrderMutator<'_>,
    ) -> StoreResult<Option<Updated<Order>>> {
        let mut tables = self.tables.lock();
        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(None);
        };
        let before = order.clone();
        let mut after = before.clone();
        mutate(&mut after).map_err(StoreError::Rejected)?;
        *order = after.clone();
        Ok(Some(Updated { before, after }))
    }

    async fn insert_notification(&self, data: NotificationCreate) -> StoreResult<Notification> {
        let mut tables = self.tables.lock();
        tables.last_notification_id += 1;
        let notification = Notification {
            id: tables.last_notification_id,
            kind: data.kind,
            message: data.message,
            order_id: data.order_id,
            read: false,
            created_at: shared::util::now_utc(),
        };
        tables
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn scan_notifications(
        &self,
        query: &NotificationQuery,
    ) -> StoreResult<Vec<Notification>> {
        let tables = self.tables.lock();
        let mut matches: Vec<&Notification> = tables
            .notifications
            .values()
            .filter(|n| !query.unread_only || !n.read)
            .collect();
        matches.sort_by_key(|n| Reverse((n.created_at, n.id)));

        Ok(take(matches.into_iter().cloned(), query.limit))
    }

    async fn mark_notification_read(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock();
        match tables.notifications.get_mut(&id) {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_notifications_read(&self) -> StoreResult<u64> {
        let mut tables = self.tables.lock();
        let mut updated = 0;
        for n in tables.notifications.values_mut().filter(|n| !n.read) {
            n.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn settings(&self) -> StoreResult<Settings> {
        Ok(self.tables.lock().settings.clone())
    }

    async fn put_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        self.tables
            .lock()
            .settings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn insert_setting_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut tables = self.tables.lock();
        if tables.settings.contains_key(key) {
            return Ok(false);
        }
        tables.settings.insert(key.to_string(), value.to_string());
        Ok(true)
    }
}
