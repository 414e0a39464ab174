//! Report API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/daily", get(handler::daily))
        .route("/daily.csv", get(handler::daily_csv))
        .route("/period", get(handler::period))
        .route("/period.csv", get(handler::period_csv))
}
