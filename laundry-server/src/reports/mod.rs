//! Report Aggregator
//!
//! Daily and period reports over orders, filtered on the date component of
//! `created_at`, plus their CSV rendering.

pub mod csv;

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    DailyReportQuery, OrderWithCustomer, PeriodReportQuery, Report, ReportMeta, ReportSummary,
    StatusBreakdown,
};
use std::sync::Arc;

use crate::store::{DateRange, EntityStore, OrderQuery, SortOrder};
use crate::utils::time::parse_date;

/// Builds reports from the order table
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    store: Arc<dyn EntityStore>,
}

impl ReportAggregator {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Orders created on `date`
    pub async fn by_date(&self, date: NaiveDate) -> AppResult<Report> {
        self.build(ReportMeta::Daily { date }, DateRange::day(date))
            .await
    }

    /// Orders created within `[start, end]`; empty when `start > end`
    pub async fn by_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Report> {
        self.build(ReportMeta::Period { start, end }, DateRange { start, end })
            .await
    }

    /// Daily report from query parameters; defaults to today (UTC)
    pub async fn daily(&self, query: &DailyReportQuery) -> AppResult<Report> {
        let date = match query.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => parse_date("date", date)?,
            _ => shared::util::today(),
        };
        self.by_date(date).await
    }

    /// Period report from query parameters; both bounds are required
    pub async fn period(&self, query: &PeriodReportQuery) -> AppResult<Report> {
        let bound = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let (Some(start), Some(end)) = (bound(&query.start), bound(&query.end)) else {
            return Err(AppError::new(ErrorCode::ReportRangeRequired));
        };
        let start = parse_date("start", &start)?;
        let end = parse_date("end", &end)?;
        self.by_range(start, end).await
    }

    async fn build(&self, meta: ReportMeta, range: DateRange) -> AppResult<Report> {
        let orders = if range.start > range.end {
            Vec::new()
        } else {
            let query = OrderQuery {
                created: Some(range),
                sort: SortOrder::OldestFirst,
                ..Default::default()
            };
            self.store.scan_orders(&query).await?
        };

        let summary = summarize(&orders);
        tracing::debug!(
            ?meta,
            count = summary.count,
            revenue = summary.total_revenue,
            "Report built"
        );

        Ok(Report {
            meta,
            summary,
            breakdown: breakdown(&orders),
            orders,
        })
    }
}

/// Count, revenue and weight over the given orders
pub fn summarize(orders: &[OrderWithCustomer]) -> ReportSummary {
    orders.iter().fold(ReportSummary::default(), |mut acc, o| {
        acc.count += 1;
        acc.total_revenue += o.order.total;
        acc.total_weight += o.order.weight;
        acc
    })
}

/// One group per status, in order of first occurrence
pub fn breakdown(orders: &[OrderWithCustomer]) -> Vec<StatusBreakdown> {
    let mut groups: Vec<StatusBreakdown> = Vec::new();
    for o in orders {
        match groups.iter_mut().find(|g| g.status == o.order.status) {
            Some(group) => {
                group.count += 1;
                group.sum_total += o.order.total;
            }
            None => groups.push(StatusBreakdown {
                status: o.order.status,
                count: 1,
                sum_total: o.order.total,
            }),
        }
    }
    groups
}
