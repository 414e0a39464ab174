//! Report API Handlers

use axum::{Json, extract::State, http::header, response::{IntoResponse, Response}};
use shared::error::AppResult;
use shared::models::{DailyReportQuery, PeriodReportQuery, Report};

use crate::api::extract::ApiQuery;
use crate::core::ServerState;
use crate::reports::csv;

/// GET /api/reports/daily?date=YYYY-MM-DD
pub async fn daily(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<DailyReportQuery>,
) -> AppResult<Json<Report>> {
    Ok(Json(state.reports.daily(&query).await?))
}

/// GET /api/reports/period?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn period(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<PeriodReportQuery>,
) -> AppResult<Json<Report>> {
    Ok(Json(state.reports.period(&query).await?))
}

/// GET /api/reports/daily.csv
pub async fn daily_csv(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<DailyReportQuery>,
) -> AppResult<Response> {
    let report = state.reports.daily(&query).await?;
    Ok(csv_attachment(&report))
}

/// GET /api/reports/period.csv
pub async fn period_csv(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<PeriodReportQuery>,
) -> AppResult<Response> {
    let report = state.reports.period(&query).await?;
    Ok(csv_attachment(&report))
}

fn csv_attachment(report: &Report) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", report.meta.csv_filename());
    (
        [
            (header::CONTENT_TYPE, csv::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv::render(report),
    )
        .into_response()
}
