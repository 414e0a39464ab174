//! Order API Handlers

use axum::{Json, extract::State, http::header, response::IntoResponse};
use shared::error::AppResult;
use shared::models::{OrderCreate, OrderListQuery, OrderUpdate, OrderWithCustomer};

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::core::ServerState;

/// GET /api/orders?q=&status= - list orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> AppResult<Json<Vec<OrderWithCustomer>>> {
    Ok(Json(state.orders.list(query).await?))
}

/// GET /api/orders/:id - single order with its customer
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<OrderWithCustomer>> {
    Ok(Json(state.orders.get(id).await?))
}

/// POST /api/orders - create order
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> AppResult<Json<OrderWithCustomer>> {
    Ok(Json(state.orders.create(payload).await?))
}

/// PUT /api/orders/:id - partial update (status, weight, price_per_kg, note)
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderUpdate>,
) -> AppResult<Json<OrderWithCustomer>> {
    Ok(Json(state.orders.update(id, payload).await?))
}

/// GET /api/orders/:id/receipt - plain-text receipt
pub async fn receipt(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<impl IntoResponse> {
    let order = state.orders.get(id).await?;
    let text = state.receipts.render(&order);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
