//! Derived statistics over weekly and aligned series.
//!
//! Everything here is recomputed per call; nothing is cached.

use crate::domain::{AlignedRow, WeekPoint};
use crate::error::SeriesError;

/// Rolling mean over `values` with the given window (in rows).
///
/// `window <= 1` is the identity transform: every row gets its own value,
/// with no undefined leading rows. For wider windows the first `window - 1`
/// rows have no sufficient history and are `None` — missing, never zero or
/// extrapolated.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window <= 1 {
        return values.iter().map(|&v| Some(v)).collect();
    }

    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, &v) in values.iter().enumerate() {
        running += v;
        if i + 1 < window {
            out.push(None);
            continue;
        }
        if i + 1 > window {
            running -= values[i - window];
        }
        out.push(Some(running / window as f64));
    }
    out
}

/// Fill the smoothed columns of a merged table in place.
pub fn apply_rolling(rows: &mut [AlignedRow], window: usize) {
    let a: Vec<f64> = rows.iter().map(|r| r.value_a).collect();
    let b: Vec<f64> = rows.iter().map(|r| r.value_b).collect();

    let a_smooth = rolling_mean(&a, window);
    let b_smooth = rolling_mean(&b, window);

    for (row, (sa, sb)) in rows.iter_mut().zip(a_smooth.into_iter().zip(b_smooth)) {
        row.value_a_smoothed = sa;
        row.value_b_smoothed = sb;
    }
}

/// The value at the maximum week key, independent of physical row order.
///
/// Fails loudly on an empty series: asking for the latest value of nothing
/// is a usage error, not a data condition.
pub fn latest_value(series: &[WeekPoint]) -> Result<f64, SeriesError> {
    series
        .iter()
        .max_by_key(|p| p.week)
        .map(|p| p.value)
        .ok_or(SeriesError::EmptyInput {
            what: "latest-value lookup on a series with no rows",
        })
}

/// Pearson correlation between the two value columns of a merged table.
///
/// Undefined cases report NaN rather than erroring: fewer than 2 rows, or a
/// constant column (zero variance).
pub fn pearson(rows: &[AlignedRow]) -> f64 {
    let n = rows.len();
    if n < 2 {
        return f64::NAN;
    }

    let nf = n as f64;
    let mean_a = rows.iter().map(|r| r.value_a).sum::<f64>() / nf;
    let mean_b = rows.iter().map(|r| r.value_b).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for r in rows {
        let da = r.value_a - mean_a;
        let db = r.value_b - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wp(day: u32, value: f64) -> WeekPoint {
        WeekPoint {
            week: NaiveDate::from_ymd_opt(2012, 1, day).unwrap(),
            value,
        }
    }

    fn merged(pairs: &[(f64, f64)]) -> Vec<AlignedRow> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                AlignedRow::new(
                    NaiveDate::from_ymd_opt(2012, 1, 1).unwrap() + chrono::Days::new(7 * i as u64),
                    a,
                    b,
                )
            })
            .collect()
    }

    #[test]
    fn rolling_window_one_is_identity() {
        let values = [3.0, 1.0, 4.0];
        let out = rolling_mean(&values, 1);
        assert_eq!(out, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn rolling_leading_rows_are_missing_not_zero() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let out = rolling_mean(&values, 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
    }

    #[test]
    fn apply_rolling_fills_both_columns() {
        let mut rows = merged(&[(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)]);
        apply_rolling(&mut rows, 2);

        assert_eq!(rows[0].value_a_smoothed, None);
        assert_eq!(rows[1].value_a_smoothed, Some(1.5));
        assert_eq!(rows[2].value_b_smoothed, Some(25.0));
    }

    #[test]
    fn latest_value_ignores_row_order() {
        let sorted = vec![wp(6, 100.0), wp(13, 300.0), wp(20, 500.0)];
        let shuffled = vec![wp(13, 300.0), wp(6, 100.0), wp(20, 500.0)];

        assert_eq!(latest_value(&sorted).unwrap(), 500.0);
        assert_eq!(latest_value(&shuffled).unwrap(), 500.0);
    }

    #[test]
    fn latest_value_fails_on_empty_series() {
        let err = latest_value(&[]).unwrap_err();
        assert!(matches!(err, SeriesError::EmptyInput { .. }));
    }

    #[test]
    fn pearson_detects_perfect_linear_relations() {
        let up = merged(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        assert!((pearson(&up) - 1.0).abs() < 1e-12);

        let down = merged(&[(1.0, 6.0), (2.0, 4.0), (3.0, 2.0)]);
        assert!((pearson(&down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_nan_for_degenerate_inputs() {
        assert!(pearson(&[]).is_nan());
        assert!(pearson(&merged(&[(1.0, 2.0)])).is_nan());
        // Constant column: zero variance.
        assert!(pearson(&merged(&[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)])).is_nan());
    }
}
