//! Setting Repository

use super::RepoResult;
use shared::models::{Setting, Settings};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Settings> {
    let rows = sqlx::query_as::<_, Setting>("SELECT key, value FROM settings")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
}

pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns `true` when the row was inserted
pub async fn insert_if_absent(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
