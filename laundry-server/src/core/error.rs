use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::store::StoreError;

/// Startup / serve errors (everything before and around the router)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage initialization failed: {0}")]
    Storage(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Server Result type alias
pub type Result<T> = std::result::Result<T, ServerError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(err) => err,
            StoreError::MissingReference(what) => {
                AppError::with_message(ErrorCode::NotFound, format!("{what} not found"))
            }
            StoreError::Database(sqlx::Error::Database(db_err))
                if db_err.is_foreign_key_violation() =>
            {
                AppError::with_message(ErrorCode::NotFound, "Referenced record not found")
            }
            other => {
                // Details stay in the log; the client only sees the code
                tracing::error!(error = %other, "Store operation failed");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}
