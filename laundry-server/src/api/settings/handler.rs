//! Settings API Handlers

use axum::{Json, extract::State};
use shared::error::AppResult;
use shared::models::{SettingUpdate, Settings};

use crate::api::extract::ApiJson;
use crate::core::ServerState;

/// GET /api/settings - all settings as a key/value map
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Settings>> {
    Ok(Json(state.settings.all().await?))
}

/// PUT /api/settings/price_per_kg - body `{"value": ...}`
pub async fn update_price_per_kg(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<SettingUpdate>,
) -> AppResult<Json<Settings>> {
    Ok(Json(state.settings.set_price_per_kg(payload).await?))
}
