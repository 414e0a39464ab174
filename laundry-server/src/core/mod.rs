//! Core module - server configuration, state and errors
//!
//! # Module Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared services handed to the router
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, StoreBackend};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
