//! Notification Emitter
//!
//! Appends notification records for order events and serves the polling,
//! mark-read and mark-all-read operations.

use async_trait::async_trait;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Notification, NotificationCreate};
use std::sync::Arc;

use crate::store::{EntityStore, NotificationQuery};

/// Unread notifications returned per poll
pub const UNREAD_LIMIT: u32 = 100;

/// Notifications returned when listing everything
pub const ALL_LIMIT: u32 = 200;

/// Destination for event notifications
///
/// Callers await `emit` inline and treat a failure as non-fatal.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, data: NotificationCreate) -> AppResult<Notification>;
}

/// Store-backed notification service
#[derive(Debug, Clone)]
pub struct NotificationEmitter {
    store: Arc<dyn EntityStore>,
}

impl NotificationEmitter {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Unread notifications, newest first
    pub async fn list_unread(&self) -> AppResult<Vec<Notification>> {
        let query = NotificationQuery {
            unread_only: true,
            limit: Some(UNREAD_LIMIT),
        };
        Ok(self.store.scan_notifications(&query).await?)
    }

    /// Read and unread notifications, newest first
    pub async fn list_all(&self) -> AppResult<Vec<Notification>> {
        let query = NotificationQuery {
            unread_only: false,
            limit: Some(ALL_LIMIT),
        };
        Ok(self.store.scan_notifications(&query).await?)
    }

    /// Mark one notification read; marking it again is a no-op
    pub async fn mark_read(&self, id: i64) -> AppResult<()> {
        if !self.store.mark_notification_read(id).await? {
            return Err(AppError::with_message(
                ErrorCode::NotificationNotFound,
                format!("Notification {id} not found"),
            ));
        }
        tracing::debug!(notification_id = id, "Notification marked read");
        Ok(())
    }

    /// Mark every unread notification read; returns how many flipped
    pub async fn mark_all_read(&self) -> AppResult<u64> {
        let updated = self.store.mark_all_notifications_read().await?;
        tracing::debug!(updated, "All notifications marked read");
        Ok(updated)
    }
}

#[async_trait]
impl NotificationSink for NotificationEmitter {
    async fn emit(&self, data: NotificationCreate) -> AppResult<Notification> {
        let notification = self.store.insert_notification(data).await?;
        tracing::info!(
            notification_id = notification.id,
            order_id = ?notification.order_id,
            kind = %notification.kind,
            "Notification emitted"
        );
        Ok(notification)
    }
}
