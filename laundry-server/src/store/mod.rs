//! Entity Store
//!
//! Durable keyed records for customers, orders, notifications and settings.
//! Every service talks to an `Arc<dyn EntityStore>`; two backends exist:
//!
//! - [`SqliteStore`]: relational store over a `SqlitePool`
//! - [`MemoryStore`]: process-local tables, used for the in-process variant
//!   and in tests

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::{AppError, AppResult};
use shared::models::{
    Customer, NewCustomer, NewOrder, Notification, NotificationCreate, Order, OrderStatus,
    OrderWithCustomer, Settings,
};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// The mutator refused the post-update state; nothing was written
    #[error("Update rejected: {0}")]
    Rejected(AppError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Sort direction on `created_at` (ties broken by id)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Inclusive range over the `YYYY-MM-DD` date component of `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Customer scan parameters
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    /// Literal substring of name or phone, compared by [`search_key`]
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl CustomerQuery {
    pub fn needle(&self) -> Option<String> {
        self.search.as_deref().map(search_key)
    }
}

/// Order scan parameters
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Literal substring of customer name / phone, or an exact order id
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub created: Option<DateRange>,
    pub sort: SortOrder,
    pub limit: Option<u32>,
}

impl OrderQuery {
    /// Order id the search text names, if it is a number
    pub fn search_id(&self) -> Option<i64> {
        self.search.as_deref().and_then(|q| q.trim().parse().ok())
    }

    pub fn needle(&self) -> Option<String> {
        self.search.as_deref().map(search_key)
    }
}

/// Notification scan parameters (always newest first)
#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub unread_only: bool,
    pub limit: Option<u32>,
}

/// Record state on both sides of an update
#[derive(Debug, Clone, PartialEq)]
pub struct Updated<T> {
    pub before: T,
    pub after: T,
}

/// In-place order mutation applied inside the store's update
///
/// An `Err` aborts the update and leaves the stored order untouched.
pub type OrderMutator<'a> = &'a (dyn Fn(&mut Order) -> AppResult<()> + Send + Sync);

/// Persistence contract shared by both backends
#[async_trait]
pub trait EntityStore: Send + Sync + std::fmt::Debug {
    // ---- customers ----
    async fn insert_customer(&self, data: NewCustomer) -> StoreResult<Customer>;
    async fn get_customer(&self, id: i64) -> StoreResult<Option<Customer>>;
    async fn scan_customers(&self, query: &CustomerQuery) -> StoreResult<Vec<Customer>>;

    // ---- orders ----
    /// Fails with [`StoreError::MissingReference`] (or a foreign key
    /// violation) when the customer does not exist
    async fn insert_order(&self, data: NewOrder) -> StoreResult<Order>;
    async fn get_order(&self, id: i64) -> StoreResult<Option<OrderWithCustomer>>;
    async fn scan_orders(&self, query: &OrderQuery) -> StoreResult<Vec<OrderWithCustomer>>;
    /// Read-modify-write of one order; `None` when the id does not exist,
    /// [`StoreError::Rejected`] when the mutator fails
    async fn update_order(
        &self,
        id: i64,
        mutate: OrderMutator<'_>,
    ) -> StoreResult<Option<Updated<Order>>>;

    // ---- notifications ----
    async fn insert_notification(&self, data: NotificationCreate) -> StoreResult<Notification>;
    async fn scan_notifications(&self, query: &NotificationQuery)
    -> StoreResult<Vec<Notification>>;
    /// `false` when the id does not exist; already-read rows count as found
    async fn mark_notification_read(&self, id: i64) -> StoreResult<bool>;
    /// Number of rows flipped from unread to read
    async fn mark_all_notifications_read(&self) -> StoreResult<u64>;

    // ---- settings ----
    async fn settings(&self) -> StoreResult<Settings>;
    async fn put_setting(&self, key: &str, value: &str) -> StoreResult<()>;
    /// `true` when the value was inserted
    async fn insert_setting_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;
}

/// Case-folded form of searchable text.
///
/// Both backends compare these keys with a plain substring test, so `%` and
/// `_` are ordinary characters and non-ASCII letters fold the same way.
/// SQLite keeps the key in `*_key` columns written at insert.
pub fn search_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Effective SQL `LIMIT` (-1 means unbounded in SQLite)
pub(crate) fn sql_limit(limit: Option<u32>) -> i64 {
    limit.map(i64::from).unwrap_or(-1)
}

#[cfg(test)]
mod tests;
