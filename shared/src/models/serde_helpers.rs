//! Lenient serde helpers for form-style JSON payloads
//!
//! The web client posts whatever its inputs hold: numbers, numeric strings,
//! empty strings or `null`. These helpers coerce them the way the shop
//! expects instead of rejecting the whole request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to `f64`; anything that is not a finite number is 0
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Coerce a JSON value to a positive record id
pub fn coerce_id(value: Option<&Value>) -> Option<i64> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.filter(|id| *id > 0)
}

/// Deserialize a number-ish field, defaulting to 0
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|v| coerce_f64(v.as_ref()))
}

/// Deserialize a number-ish patch field: present means `Some`, even when it coerces to 0
///
/// Use together with `#[serde(default)]` so an absent field stays `None`.
pub fn lenient_f64_patch<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|v| Some(coerce_f64(v.as_ref())))
}

/// Deserialize an id that may arrive as number or string; blanks and zero are `None`
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|v| coerce_id(v.as_ref()))
}

/// Deserialize an optional text field, treating blank strings as absent
pub fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|opt| opt.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Distinguish an explicit `null` from an absent field
///
/// With `#[serde(default)]`: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(value))`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
