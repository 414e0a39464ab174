//! Customer Repository

use super::{RepoError, RepoResult};
use crate::store::{CustomerQuery, search_key, sql_limit};
use shared::models::{Customer, NewCustomer};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, name, phone, note, created_at FROM customers";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Newest first; matches against the folded `name_key` / `phone_key` columns
pub async fn search(pool: &SqlitePool, query: &CustomerQuery) -> RepoResult<Vec<Customer>> {
    let sql = format!(
        "{CUSTOMER_SELECT} WHERE (?1 IS NULL OR instr(name_key, ?1) > 0 OR instr(phone_key, ?1) > 0) ORDER BY created_at DESC, id DESC LIMIT ?2"
    );
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(query.needle())
        .bind(sql_limit(query.limit))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: NewCustomer) -> RepoResult<Customer> {
    let now = shared::util::now_utc();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO customers (name, phone, note, created_at, name_key, phone_key) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.note)
    .bind(now)
    .bind(search_key(&data.name))
    .bind(search_key(&data.phone))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(sqlx::Error::RowNotFound))
}
