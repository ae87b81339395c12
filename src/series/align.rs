//! Series alignment: joining two weekly series on their week keys.
//!
//! Two modes, matching the two conventions that appear in this domain:
//!
//! - **Exact**: inner join on identical week keys; correct once both series
//!   were normalized under the same weekly-key policy.
//! - **Nearest**: for each left row, the closest right row within a
//!   tolerance; tolerates series anchored to different days of the week.
//!
//! Inputs are expected ascending by week key, but both modes sort
//! defensively. Two non-empty series sharing no week key produce an empty
//! result — a legitimate outcome, distinct from malformed input.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{AlignMode, AlignedRow, WeekPoint};

/// Join `series_a` (left, driving) and `series_b` (right) under `mode`.
///
/// `tolerance_days` only applies to [`AlignMode::Nearest`]. Output is
/// ascending by `series_a` week key; ties keep `series_a` input order.
pub fn align(
    series_a: &[WeekPoint],
    series_b: &[WeekPoint],
    mode: AlignMode,
    tolerance_days: i64,
) -> Vec<AlignedRow> {
    match mode {
        AlignMode::Exact => align_exact(series_a, series_b),
        AlignMode::Nearest => align_nearest(series_a, series_b, tolerance_days),
    }
}

/// Inner join on identical week keys; unmatched rows are excluded.
pub fn align_exact(series_a: &[WeekPoint], series_b: &[WeekPoint]) -> Vec<AlignedRow> {
    let a = sorted_by_week(series_a);
    let lookup: BTreeMap<NaiveDate, f64> = series_b.iter().map(|p| (p.week, p.value)).collect();

    a.iter()
        .filter_map(|p| {
            lookup
                .get(&p.week)
                .map(|&value_b| AlignedRow::new(p.week, p.value, value_b))
        })
        .collect()
}

/// Match each left row to the closest right row, accepting the match only
/// when the absolute difference is within `tolerance_days`. Exact-distance
/// ties go to the earlier right row.
pub fn align_nearest(
    series_a: &[WeekPoint],
    series_b: &[WeekPoint],
    tolerance_days: i64,
) -> Vec<AlignedRow> {
    let a = sorted_by_week(series_a);
    let b = sorted_by_week(series_b);
    if b.is_empty() {
        return Vec::new();
    }

    a.iter()
        .filter_map(|p| {
            let idx = b.partition_point(|q| q.week < p.week);

            // Earlier candidate first so it wins exact-distance ties.
            let mut best: Option<&WeekPoint> = (idx > 0).then(|| &b[idx - 1]);
            if let Some(cand) = b.get(idx) {
                let closer = best.is_none_or(|cur| day_distance(cand, p) < day_distance(cur, p));
                if closer {
                    best = Some(cand);
                }
            }

            best.and_then(|q| {
                let diff = day_distance(q, p);
                (diff <= tolerance_days).then(|| AlignedRow::new(p.week, p.value, q.value))
            })
        })
        .collect()
}

fn day_distance(x: &WeekPoint, y: &WeekPoint) -> i64 {
    (x.week - y.week).num_days().abs()
}

fn sorted_by_week(series: &[WeekPoint]) -> Vec<WeekPoint> {
    let mut out = series.to_vec();
    // Stable sort keeps input order for equal week keys.
    out.sort_by_key(|p| p.week);
    out
}
