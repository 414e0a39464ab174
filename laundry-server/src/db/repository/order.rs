//! Order Repository

use super::{RepoError, RepoResult};
use crate::store::{OrderQuery, SortOrder, sql_limit};
use shared::models::{NewOrder, Order, OrderWithCustomer};
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str =
    "id, customer_id, weight, price_per_kg, total, status, created_at, due_date, note";

const ORDER_WITH_CUSTOMER_SELECT: &str = "SELECT o.id, o.customer_id, o.weight, o.price_per_kg, o.total, o.status, o.created_at, o.due_date, o.note, c.name AS customer_name, c.phone AS customer_phone FROM orders o LEFT JOIN customers c ON c.id = o.customer_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderWithCustomer>> {
    let sql = format!("{ORDER_WITH_CUSTOMER_SELECT} WHERE o.id = ?");
    let row = sqlx::query_as::<_, OrderWithCustomer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Filtered scan; the date range compares the `YYYY-MM-DD` prefix of `created_at`
pub async fn find_filtered(
    pool: &SqlitePool,
    query: &OrderQuery,
) -> RepoResult<Vec<OrderWithCustomer>> {
    let direction = match query.sort {
        SortOrder::NewestFirst => "DESC",
        SortOrder::OldestFirst => "ASC",
    };
    let sql = format!(
        "{ORDER_WITH_CUSTOMER_SELECT} WHERE (?1 IS NULL OR instr(c.name_key, ?1) > 0 OR instr(c.phone_key, ?1) > 0 OR o.id = ?2) AND (?3 IS NULL OR o.status = ?3) AND (?4 IS NULL OR substr(o.created_at, 1, 10) >= ?4) AND (?5 IS NULL OR substr(o.created_at, 1, 10) <= ?5) ORDER BY o.created_at {direction}, o.id {direction} LIMIT ?6"
    );
    let rows = sqlx::query_as::<_, OrderWithCustomer>(&sql)
        .bind(query.needle())
        .bind(query.search_id())
        .bind(query.status)
        .bind(query.created.map(|r| r.start.to_string()))
        .bind(query.created.map(|r| r.end.to_string()))
        .bind(sql_limit(query.limit))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: NewOrder) -> RepoResult<Order> {
    let order = data.into_order(0);
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_id, weight, price_per_kg, total, status, created_at, due_date, note) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(order.customer_id)
    .bind(order.weight)
    .bind(order.price_per_kg)
    .bind(order.total)
    .bind(order.status)
    .bind(order.created_at)
    .bind(&order.due_date)
    .bind(&order.note)
    .fetch_one(pool)
    .await?;
    Ok(Order { id, ..order })
}

/// Plain order row, for use inside a transaction
pub async fn find_row(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Write every mutable column of an order row
pub async fn write_row(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE orders SET weight = ?1, price_per_kg = ?2, total = ?3, status = ?4, due_date = ?5, note = ?6 WHERE id = ?7",
    )
    .bind(order.weight)
    .bind(order.price_per_kg)
    .bind(order.total)
    .bind(order.status)
    .bind(&order.due_date)
    .bind(&order.note)
    .bind(order.id)
    .execute(conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::Database(sqlx::Error::RowNotFound));
    }
    Ok(())
}
