//! Unified error codes for the laundry service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Customer errors
//! - 2xxx: Order errors
//! - 3xxx: Notification errors
//! - 4xxx: Report errors
//! - 5xxx: Settings errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the web client can match
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Resource not found
    NotFound = 3,
    /// Request body, path or query could not be parsed
    InvalidRequest = 5,

    // ==================== 1xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 1001,
    /// Customer name is required
    CustomerNameRequired = 1002,

    // ==================== 2xxx: Order ====================
    /// Order not found
    OrderNotFound = 2001,
    /// Order customer reference is missing
    OrderCustomerRequired = 2002,
    /// Order status is not one of the known values
    OrderInvalidStatus = 2003,
    /// Weight or price is negative, or their product is not finite
    OrderInvalidAmount = 2004,

    // ==================== 3xxx: Notification ====================
    /// Notification not found
    NotificationNotFound = 3001,

    // ==================== 4xxx: Report ====================
    /// Report range bounds are missing
    ReportRangeRequired = 4001,
    /// Report date is not YYYY-MM-DD
    ReportInvalidDate = 4002,

    // ==================== 5xxx: Settings ====================
    /// Setting value is missing or invalid
    SettingInvalidValue = 5001,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",
            ErrorCode::CustomerNameRequired => "name required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderCustomerRequired => "customer_id required",
            ErrorCode::OrderInvalidStatus => "Unknown order status",
            ErrorCode::OrderInvalidAmount => "Weight and price must be non-negative numbers",

            // Notification
            ErrorCode::NotificationNotFound => "Notification not found",

            // Report
            ErrorCode::ReportRangeRequired => "start and end required (YYYY-MM-DD)",
            ErrorCode::ReportInvalidDate => "Date must be formatted as YYYY-MM-DD",

            // Settings
            ErrorCode::SettingInvalidValue => "value required",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Customer
            1001 => Ok(ErrorCode::CustomerNotFound),
            1002 => Ok(ErrorCode::CustomerNameRequired),

            // Order
            2001 => Ok(ErrorCode::OrderNotFound),
            2002 => Ok(ErrorCode::OrderCustomerRequired),
            2003 => Ok(ErrorCode::OrderInvalidStatus),
            2004 => Ok(ErrorCode::OrderInvalidAmount),

            // Notification
            3001 => Ok(ErrorCode::NotificationNotFound),

            // Report
            4001 => Ok(ErrorCode::ReportRangeRequired),
            4002 => Ok(ErrorCode::ReportInvalidDate),

            // Settings
            5001 => Ok(ErrorCode::SettingInvalidValue),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
