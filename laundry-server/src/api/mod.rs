//! API routing module
//!
//! # Structure
//!
//! - [`extract`] - request extractors mapping rejections to `AppError`
//! - [`health`] - health check
//! - [`customers`] - customer records
//! - [`orders`] - order lifecycle and receipts
//! - [`notifications`] - notification polling and read flags
//! - [`reports`] - daily / period reports (JSON and CSV)
//! - [`settings`] - shop settings

pub mod customers;
pub mod extract;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod reports;
pub mod settings;

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API
        .merge(health::router())
        // Domain APIs
        .merge(customers::router())
        .merge(orders::router())
        .merge(notifications::router())
        .merge(reports::router())
        .merge(settings::router())
}

/// Build a fully configured application with all middleware and state
///
/// Used by both the HTTP server and in-process (oneshot) calls
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    build_router()
        // CORS - the web client may be served from another origin
        .layer(CorsLayer::permissive())
        // Request timeout
        .layer(TimeoutLayer::new(timeout))
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
