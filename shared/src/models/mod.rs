//! Data models
//!
//! Shared between laundry-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod customer;
pub mod notification;
pub mod order;
pub mod report;
pub mod serde_helpers;
pub mod setting;

// Re-exports
pub use customer::*;
pub use notification::*;
pub use order::*;
pub use report::*;
pub use setting::*;
