//! Date-window normalization for the filtered endpoints.
//!
//! A window applies only when both bounds are present and parse as
//! calendar dates. A single bound leaves the result unfiltered. An
//! inverted window (`end < start`) is kept as-is; it matches nothing,
//! which callers report as an empty result rather than an error.

use crate::error::{AnalyticsError, AnalyticsResult};
use chrono::NaiveDate;
use leadflow_core::types::DateRange;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve optional `start_date` / `end_date` strings into a range.
///
/// Blank strings count as absent. A present, non-blank bound that does
/// not parse is a validation error even when the other bound is missing.
pub fn resolve_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> AnalyticsResult<Option<DateRange>> {
    let start = parse_bound("start_date", start_date)?;
    let end = parse_bound("end_date", end_date)?;
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange { start, end })),
        _ => Ok(None),
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> AnalyticsResult<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            AnalyticsError::validation(format!("'{field}' must be a date in YYYY-MM-DD format"))
        })
}
