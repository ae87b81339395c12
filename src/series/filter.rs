//! Date-window filtering.
//!
//! Emptiness is the signal here, not an error: a window with no rows
//! propagates an empty series so callers can branch on "no data in range"
//! without any error handling.

use chrono::NaiveDate;

use crate::domain::WeekPoint;

/// Keep rows with `week >= start` and, when `end` is given, `week <= end`.
/// Non-destructive: returns a new series.
pub fn filter_range(series: &[WeekPoint], start: NaiveDate, end: Option<NaiveDate>) -> Vec<WeekPoint> {
    series
        .iter()
        .filter(|p| p.week >= start && end.is_none_or(|e| p.week <= e))
        .copied()
        .collect()
}

/// Keep rows with `week >= start`.
pub fn filter_since(series: &[WeekPoint], start: NaiveDate) -> Vec<WeekPoint> {
    filter_range(series, start, None)
}
