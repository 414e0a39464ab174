use chrono::{DateTime, DurationRound, NaiveDate, TimeDelta, Utc};

/// Current UTC time truncated to milliseconds
///
/// Stored timestamps round-trip through SQLite text at millisecond
/// precision, so both stores stamp records the same way.
pub fn now_utc() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Render a number the way the shop displays it: integral values without a
/// fractional part (`30000`, not `30000.0`)
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
