//! Logging Infrastructure
//!
//! `tracing` subscriber setup: stdout by default, daily rolling files when a
//! log directory is configured.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "laundry-server";

/// Default filter for a level: our crate plus request tracing
fn default_filter(level: &str) -> String {
    format!("laundry_server={level},tower_http={level},shared={level}")
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        match std::fs::create_dir_all(log_path) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX);
                subscriber.with_ansi(false).with_writer(file_appender).init();
                return;
            }
            Err(e) => eprintln!("log dir {dir} unavailable ({e}), logging to stdout"),
        }
    }

    subscriber.init();
}
