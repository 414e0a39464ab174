//! SQLite-backed entity store

use async_trait::async_trait;
use shared::models::{
    Customer, NewCustomer, NewOrder, Notification, NotificationCreate, Order, OrderWithCustomer,
    Settings,
};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use super::{
    CustomerQuery, EntityStore, NotificationQuery, OrderMutator, OrderQuery, StoreError,
    StoreResult, Updated,
};
use crate::db::repository::{customer, notification, order, setting};

/// Relational store over a SQLite pool
///
/// Order updates are read-modify-write inside one transaction; the write
/// lock keeps two patches from interleaving on the same pool.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    write_lock: Mutex<()>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn insert_customer(&self, data: NewCustomer) -> StoreResult<Customer> {
        customer::create(&self.pool, data).await
    }

    async fn get_customer(&self, id: i64) -> StoreResult<Option<Customer>> {
        customer::find_by_id(&self.pool, id).await
    }

    async fn scan_customers(&self, query: &CustomerQuery) -> StoreResult<Vec<Customer>> {
        customer::search(&self.pool, query).await
    }

    async fn insert_order(&self, data: NewOrder) -> StoreResult<Order> {
        order::create(&self.pool, data).await
    }

    async fn get_order(&self, id: i64) -> StoreResult<Option<OrderWithCustomer>> {
        order::find_by_id(&self.pool, id).await
    }

    async fn scan_orders(&self, query: &OrderQuery) -> StoreResult<Vec<OrderWithCustomer>> {
        order::find_filtered(&self.pool, query).await
    }

    async fn update_order(
        &self,
        id: i64,
        mutate: OrderMutator<'_>,
    ) -> StoreResult<Option<Updated<Order>>> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let Some(before) = order::find_row(&mut *tx, id).await? else {
            return Ok(None);
        };
        let mut after = before.clone();
        // Dropping the transaction rolls it back
        mutate(&mut after).map_err(StoreError::Rejected)?;
        order::write_row(&mut *tx, &after).await?;

        tx.commit().await?;
        Ok(Some(Updated { before, after }))
    }

    async fn insert_notification(&self, data: NotificationCreate) -> StoreResult<Notification> {
        notification::create(&self.pool, data).await
    }

    async fn scan_notifications(
        &self,
        query: &NotificationQuery,
    ) -> StoreResult<Vec<Notification>> {
        notification::find_recent(&self.pool, query).await
    }

    async fn mark_notification_read(&self, id: i64) -> StoreResult<bool> {
        notification::mark_read(&self.pool, id).await
    }

    async fn mark_all_notifications_read(&self) -> StoreResult<u64> {
        notification::mark_all_read(&self.pool).await
    }

    async fn settings(&self) -> StoreResult<Settings> {
        setting::find_all(&self.pool).await
    }

    async fn put_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        setting::upsert(&self.pool, key, value).await
    }

    async fn insert_setting_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        setting::insert_if_absent(&self.pool, key, value).await
    }
}
