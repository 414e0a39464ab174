//! Order lifecycle
//!
//! - [`OrderManager`]: validates create/update input, keeps `total` derived,
//!   and raises a notification on creation and on every status change

pub mod manager;

pub use manager::OrderManager;
