//! Report Model
//!
//! Daily and period reports over orders, grouped by creation date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::{OrderStatus, OrderWithCustomer};

/// Totals over a filtered order set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(rename = "total_orders")]
    pub count: u64,
    pub total_revenue: f64,
    pub total_weight: f64,
}

/// Per-status group of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub status: OrderStatus,
    pub count: u64,
    pub sum_total: f64,
}

/// Date selection a report was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportMeta {
    Daily { date: NaiveDate },
    Period { start: NaiveDate, end: NaiveDate },
}

impl ReportMeta {
    /// Download file name for the CSV export
    pub fn csv_filename(&self) -> String {
        match self {
            ReportMeta::Daily { date } => format!("report-daily-{date}.csv"),
            ReportMeta::Period { start, end } => format!("report-period-{start}_to_{end}.csv"),
        }
    }
}

/// Report: selection + summary + breakdown + the orders themselves
///
/// `orders` are oldest first; `breakdown` follows first occurrence in `orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub breakdown: Vec<StatusBreakdown>,
    pub orders: Vec<OrderWithCustomer>,
}

/// Query parameters of the daily report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyReportQuery {
    pub date: Option<String>,
}

/// Query parameters of the period report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodReportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}
