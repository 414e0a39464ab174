//! Shared types for the laundry service
//!
//! Models, the unified error system and small utilities used by the server
//! and by anything calling its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
