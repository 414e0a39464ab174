//! Notification API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{MarkAllReadResponse, MarkReadResponse, Notification};

use crate::api::extract::{ApiPath, ApiQuery};
use crate::core::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// `1` or `true` selects unread notifications only
    pub unread: Option<String>,
}

impl ListQuery {
    fn unread_only(&self) -> bool {
        matches!(self.unread.as_deref().map(str::trim), Some("1" | "true"))
    }
}

/// GET /api/notifications?unread= - newest first
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = if query.unread_only() {
        state.notifications.list_unread().await?
    } else {
        state.notifications.list_all().await?
    };
    Ok(Json(notifications))
}

/// PUT /api/notifications/:id/read - mark one read (idempotent)
pub async fn mark_read(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MarkReadResponse>> {
    state.notifications.mark_read(id).await?;
    Ok(Json(MarkReadResponse { id, read: true }))
}

/// PUT /api/notifications/read-all - mark every unread notification read
pub async fn mark_all_read(
    State(state): State<ServerState>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let updated = state.notifications.mark_all_read().await?;
    Ok(Json(MarkAllReadResponse { updated }))
}
