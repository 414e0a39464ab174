use std::str::FromStr;

use crate::printing::DEFAULT_RECEIPT_WIDTH;

/// Which entity store backs the services
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite database at `DATABASE_PATH`
    #[default]
    Sqlite,
    /// Process-local tables, lost on exit
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// Server configuration
///
/// # Environment Variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATABASE_PATH | laundry.db | SQLite file (`:memory:` for ephemeral) |
/// | STORE_BACKEND | sqlite | `sqlite` or `memory` |
/// | LOG_LEVEL | info | filter used when `RUST_LOG` is unset |
/// | LOG_DIR | (unset) | daily rolling log files when set |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout (ms) |
/// | RECEIPT_WIDTH | 32 | receipt width in characters |
/// | ENVIRONMENT | development | development / production |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/laundry.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_path: String,
    pub store_backend: StoreBackend,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    pub receipt_width: usize,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "laundry.db".into()),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            receipt_width: std::env::var("RECEIPT_WIDTH")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_RECEIPT_WIDTH),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// In-memory configuration for tests and embedded use
    pub fn in_memory() -> Self {
        Self {
            http_port: 0,
            database_path: crate::db::MEMORY_PATH.into(),
            store_backend: StoreBackend::Memory,
            log_level: "info".into(),
            log_dir: None,
            request_timeout_ms: 30000,
            receipt_width: DEFAULT_RECEIPT_WIDTH,
            environment: "development".into(),
        }
    }
}
