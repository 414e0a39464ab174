//! Notification Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification tag used for order events
pub const KIND_ORDER: &str = "order";

/// Notification entity
///
/// Append-only; `read` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub order_id: Option<i64>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification to append
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCreate {
    pub kind: String,
    pub message: String,
    pub order_id: Option<i64>,
}

impl NotificationCreate {
    /// Order event notification
    pub fn order(order_id: i64, message: impl Into<String>) -> Self {
        Self {
            kind: KIND_ORDER.to_string(),
            message: message.into(),
            order_id: Some(order_id),
        }
    }
}

/// Response for marking a single notification read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub id: i64,
    pub read: bool,
}

/// Response for marking every notification read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}
