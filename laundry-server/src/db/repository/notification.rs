//! Notification Repository

use super::{RepoError, RepoResult};
use crate::store::{NotificationQuery, sql_limit};
use shared::models::{Notification, NotificationCreate};
use sqlx::SqlitePool;

const NOTIFICATION_SELECT: &str =
    "SELECT id, type AS kind, message, order_id, read, created_at FROM notifications";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Notification>> {
    let sql = format!("{NOTIFICATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Notification>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_recent(
    pool: &SqlitePool,
    query: &NotificationQuery,
) -> RepoResult<Vec<Notification>> {
    let sql = format!(
        "{NOTIFICATION_SELECT} WHERE (?1 = 0 OR read = 0) ORDER BY created_at DESC, id DESC LIMIT ?2"
    );
    let rows = sqlx::query_as::<_, Notification>(&sql)
        .bind(query.unread_only)
        .bind(sql_limit(query.limit))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: NotificationCreate) -> RepoResult<Notification> {
    let now = shared::util::now_utc();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO notifications (type, message, order_id, read, created_at) VALUES (?1, ?2, ?3, 0, ?4) RETURNING id",
    )
    .bind(&data.kind)
    .bind(&data.message)
    .bind(data.order_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(sqlx::Error::RowNotFound))
}

/// `false` when no notification has this id
pub async fn mark_read(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE notifications SET read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(pool: &SqlitePool) -> RepoResult<u64> {
    let result = sqlx::query("UPDATE notifications SET read = 1 WHERE read = 0")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
