//! Customer API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{Customer, CustomerCreate};

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::core::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/customers?q= - search customers
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.customers.search(query.q.as_deref()).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id - single customer
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.customers.get(id).await?))
}

/// POST /api/customers - create customer
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.customers.create(payload).await?))
}
