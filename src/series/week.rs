//! Weekly-key normalization.
//!
//! A "week key" is the single timestamp chosen to represent the calendar
//! week a record belongs to. The policy must be explicit, never inferred:
//! the same calendar date always maps to the same key regardless of what
//! other rows are present.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::{Observation, WeekPolicy};

/// The Friday that ends `date`'s ISO calendar week (Mon..Sun).
///
/// Saturday and Sunday therefore map *back* to the Friday just past, which
/// keeps every date of one ISO week on one key.
pub fn week_ending_friday(date: NaiveDate) -> NaiveDate {
    // Mon=0 .. Sun=6; Friday is 4.
    let weekday = date.weekday().num_days_from_monday() as u64;
    if weekday <= 4 {
        date.checked_add_days(Days::new(4 - weekday)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(weekday - 4)).unwrap_or(date)
    }
}

/// The week key for `date` under `policy`.
pub fn week_key(date: NaiveDate, policy: WeekPolicy) -> NaiveDate {
    match policy {
        WeekPolicy::Identity => date,
        WeekPolicy::Friday => week_ending_friday(date),
    }
}

/// Replace each observation's date with its week key.
pub fn normalize_weeks(rows: &[Observation], policy: WeekPolicy) -> Vec<Observation> {
    rows.iter()
        .map(|r| Observation {
            date: week_key(r.date, policy),
            value: r.value,
        })
        .collect()
}
