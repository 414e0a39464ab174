//! CSV report export
//!
//! One quoted line per order, then a `#summary` block:
//!
//! ```text
//! id,created_at,customer_name,...,note
//! "1","2024-05-01T09:00:00.000Z","Budi",...,""
//!
//! #summary,,,
//! total_orders,1
//! total_revenue,30000
//! total_weight,2.5
//! ```

use chrono::SecondsFormat;
use shared::models::{OrderWithCustomer, Report};
use shared::util::format_number;
use std::fmt::Write;

/// MIME type of the export
pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const HEADER: [&str; 10] = [
    "id",
    "created_at",
    "customer_name",
    "customer_phone",
    "weight",
    "price_per_kg",
    "total",
    "status",
    "due_date",
    "note",
];

/// Quote a field, doubling embedded quotes; absent values stay empty
fn escape(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("\"{}\"", v.replace('"', "\"\"")),
        None => String::new(),
    }
}

fn order_line(o: &OrderWithCustomer) -> String {
    let order = &o.order;
    let fields = [
        Some(order.id.to_string()),
        Some(order.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        o.customer_name.clone(),
        o.customer_phone.clone(),
        Some(format_number(order.weight)),
        Some(format_number(order.price_per_kg)),
        Some(format_number(order.total)),
        Some(order.status.to_string()),
        order.due_date.clone(),
        Some(order.note.clone()),
    ];
    fields
        .iter()
        .map(|f| escape(f.as_deref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a report as CSV text
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');
    for o in &report.orders {
        out.push_str(&order_line(o));
        out.push('\n');
    }

    let summary = &report.summary;
    // Writing to a String cannot fail
    let _ = write!(
        out,
        "\n#summary,,,\ntotal_orders,{}\ntotal_revenue,{}\ntotal_weight,{}\n",
        summary.count,
        format_number(summary.total_revenue),
        format_number(summary.total_weight),
    );
    out
}
