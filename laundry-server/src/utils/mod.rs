//! Utilities - logging and date parsing

pub mod logger;
pub mod time;

pub use logger::init_logger_with_file;
