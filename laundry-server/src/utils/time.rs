//! Date parsing for report queries

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(field: &str, date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::with_message(
            ErrorCode::ReportInvalidDate,
            format!("Invalid {field} date: {date} (expected YYYY-MM-DD)"),
        )
        .with_detail("field", field)
    })
}
