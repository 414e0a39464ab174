//! Customer Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::non_blank;

/// Customer entity (pelanggan)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Empty when not given
    pub phone: String,
    /// Empty when not given
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Create customer payload
///
/// `name` stays optional on the wire so a missing name surfaces as a
/// validation error instead of a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerCreate {
    #[serde(default, deserialize_with = "non_blank")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub note: Option<String>,
}

/// Validated customer ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub note: String,
}
