//! Setting Model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default price per kg key
pub const PRICE_PER_KG: &str = "price_per_kg";

/// Seeded value for [`PRICE_PER_KG`]
pub const DEFAULT_PRICE_PER_KG: &str = "12000";

/// Every setting as a key → value map
pub type Settings = BTreeMap<String, String>;

/// Setting row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Update setting payload; the client may send a number or a string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingUpdate {
    #[serde(default)]
    pub value: Option<Value>,
}

impl SettingUpdate {
    /// Value as trimmed text, `None` when missing or blank
    pub fn as_text(&self) -> Option<String> {
        let text = match self.value.as_ref()? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setting_update_text() {
        let update: SettingUpdate = serde_json::from_value(json!({"value": 15000})).unwrap();
        assert_eq!(update.as_text().as_deref(), Some("15000"));

        let update: SettingUpdate = serde_json::from_value(json!({"value": " 9000 "})).unwrap();
        assert_eq!(update.as_text().as_deref(), Some("9000"));

        let update: SettingUpdate = serde_json::from_value(json!({"value": ""})).unwrap();
        assert_eq!(update.as_text(), None);

        let update: SettingUpdate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(update.as_text(), None);
    }
}
