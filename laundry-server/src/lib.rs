//! Laundry Server - order tracking for a single laundry shop
//!
//! # Architecture
//!
//! HTTP handlers (`api`) call domain services, which persist through an
//! [`store::EntityStore`] (SQLite or in-memory):
//!
//! - **Customers** (`customers`): register and search customers
//! - **Orders** (`orders`): create, patch and list orders; every create and
//!   status change raises a notification
//! - **Notifications** (`notifications`): unread polling and read flags
//! - **Reports** (`reports`): daily / period aggregates, CSV export
//! - **Settings** (`settings`): shop settings such as the default price
//! - **Printing** (`printing`): plain-text receipts
//!
//! # Module layout
//!
//! ```text
//! laundry-server/src/
//! ├── core/           # config, state, server, errors
//! ├── api/            # HTTP routes and handlers
//! ├── store/          # EntityStore trait + backends
//! ├── db/             # SQLite pool, migrations, repositories
//! ├── customers/
//! ├── orders/
//! ├── notifications/
//! ├── reports/
//! ├── settings/
//! ├── printing/
//! └── utils/          # logging, date parsing
//! ```

pub mod api;
pub mod core;
pub mod customers;
pub mod db;
pub mod notifications;
pub mod orders;
pub mod printing;
pub mod reports;
pub mod settings;
pub mod store;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use orders::OrderManager;
pub use store::{EntityStore, MemoryStore, SqliteStore};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::init_logger_with_file;

/// Initialize logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
