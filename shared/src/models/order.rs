//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::serde_helpers::{double_option, lenient_f64, lenient_f64_patch, lenient_id, non_blank};

/// Laundry order status
///
/// There is no transition graph: any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Received,
    Processing,
    Done,
    Picked,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Received,
        OrderStatus::Processing,
        OrderStatus::Done,
        OrderStatus::Picked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Processing => "processing",
            OrderStatus::Done => "done",
            OrderStatus::Picked => "picked",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status string that is not one of the four known values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Order entity
///
/// `total` is always `weight * price_per_kg`; it is never written on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub weight: f64,
    pub price_per_kg: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<String>,
    pub note: String,
}

impl Order {
    /// Derived order total
    pub fn compute_total(weight: f64, price_per_kg: f64) -> f64 {
        weight * price_per_kg
    }

    /// Bring `total` back in line with weight and price
    pub fn recompute_total(&mut self) {
        self.total = Self::compute_total(self.weight, self.price_per_kg);
    }
}

/// Order joined with its customer (list views, reports, receipts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderWithCustomer {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub order: Order,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

/// Create order payload
///
/// Numbers are accepted as JSON numbers or numeric strings; anything else
/// counts as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default, deserialize_with = "lenient_id")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_per_kg: f64,
    #[serde(default, deserialize_with = "non_blank")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Validated order ready to be stored (status `received`, total derived)
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub weight: f64,
    pub price_per_kg: f64,
    pub due_date: Option<String>,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Stored row for this order under the given id
    pub fn into_order(self, id: i64) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            weight: self.weight,
            price_per_kg: self.price_per_kg,
            total: Order::compute_total(self.weight, self.price_per_kg),
            status: OrderStatus::Received,
            created_at: self.created_at,
            due_date: self.due_date,
            note: self.note,
        }
    }
}

/// Update order payload as received over the wire
///
/// `status` stays a string here so unknown values are reported as
/// validation errors by the lifecycle manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default, deserialize_with = "non_blank")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64_patch")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64_patch")]
    pub price_per_kg: Option<f64>,
    /// absent = keep, `null` = clear, string = replace
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

/// Order list filters (`GET /api/orders?q=&status=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    #[serde(default, deserialize_with = "non_blank")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub status: Option<String>,
}

/// Typed order patch; every field independently present or absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub weight: Option<f64>,
    pub price_per_kg: Option<f64>,
    pub note: Option<Option<String>>,
}

impl OrderPatch {
    /// Apply the patch in place and recompute the total
    pub fn apply(&self, order: &mut Order) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(weight) = self.weight {
            order.weight = weight;
        }
        if let Some(price) = self.price_per_kg {
            order.price_per_kg = price;
        }
        if let Some(note) = &self.note {
            order.note = note.clone().unwrap_or_default();
        }
        order.recompute_total();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_order() -> Order {
        Order {
            id: 1,
            customer_id: 1,
            weight: 2.5,
            price_per_kg: 12000.0,
            total: 30000.0,
            status: OrderStatus::Received,
            created_at: Utc::now(),
            due_date: None,
            note: "express".to_string(),
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_eq!(
            "washing".parse::<OrderStatus>(),
            Err(UnknownStatus("washing".to_string()))
        );
        assert!("DONE".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_value(OrderStatus::Processing).unwrap(),
            json!("processing")
        );
        assert_eq!(OrderStatus::default(), OrderStatus::Received);
    }

    #[test]
    fn test_patch_keeps_omitted_fields() {
        let mut order = sample_order();
        OrderPatch {
            status: Some(OrderStatus::Done),
            ..Default::default()
        }
        .apply(&mut order);

        assert_eq!(order.status, OrderStatus::Done);
        assert_eq!(order.weight, 2.5);
        assert_eq!(order.total, 30000.0);
        assert_eq!(order.note, "express");
    }

    #[test]
    fn test_patch_recomputes_total() {
        let mut order = sample_order();
        OrderPatch {
            weight: Some(4.0),
            note: Some(None),
            ..Default::default()
        }
        .apply(&mut order);

        assert_eq!(order.total, 48000.0);
        assert_eq!(order.note, "");
    }

    #[test]
    fn test_order_with_customer_is_flat() {
        let joined = OrderWithCustomer {
            order: sample_order(),
            customer_name: Some("Budi".to_string()),
            customer_phone: Some("08123".to_string()),
        };
        let value = serde_json::to_value(&joined).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["total"], json!(30000.0));
        assert_eq!(value["customer_name"], json!("Budi"));
        assert_eq!(value["status"], json!("received"));
    }

    #[test]
    fn test_create_payload_coercion() {
        let create: OrderCreate = serde_json::from_value(json!({
            "customer_id": "3",
            "weight": "2.5",
            "price_per_kg": "abc",
            "due_date": ""
        }))
        .unwrap();
        assert_eq!(create.customer_id, Some(3));
        assert_eq!(create.weight, 2.5);
        assert_eq!(create.price_per_kg, 0.0);
        assert_eq!(create.due_date, None);
    }
}
