//! Post-pipeline schema validation.
//!
//! The opposite policy of the record parser: one bad row fails the whole
//! call. Data reaching this gate has already been cleaned, so a violation is
//! a data-quality or logic defect worth surfacing loudly rather than a row
//! to quietly drop.
//!
//! Enforced invariants per row:
//! - the week key is a valid calendar date (guaranteed by `NaiveDate`, so
//!   there is nothing left to check at runtime)
//! - the value is a finite float
//! - the value is `>= 0` (physical quantities and prices in this dataset
//!   are never negative)

use crate::domain::WeekPoint;
use crate::error::SeriesError;

/// Validate a weekly series, returning it untouched on success.
pub fn validate_weekly(series: &[WeekPoint]) -> Result<&[WeekPoint], SeriesError> {
    for (row, point) in series.iter().enumerate() {
        if !point.value.is_finite() {
            return Err(SeriesError::SchemaViolation {
                row,
                week: point.week,
                message: format!("value {} is not a finite number", point.value),
            });
        }
        if point.value < 0.0 {
            return Err(SeriesError::SchemaViolation {
                row,
                week: point.week,
                message: format!("value {} is negative", point.value),
            });
        }
    }
    Ok(series)
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

    #[test]
    fn accepts_non_negative_finite_values() {
        let series = vec![wp(6, 0.0), wp(13, 17.5)];
        assert!(validate_weekly(&series).is_ok());
    }

    #[test]
    fn rejects_a_negative_value() {
        let series = vec![wp(6, 1.0), wp(13, -5.0)];
        let err = validate_weekly(&series).unwrap_err();
        match err {
            SeriesError::SchemaViolation { row, week, .. } => {
                assert_eq!(row, 1);
                assert_eq!(week, NaiveDate::from_ymd_opt(2012, 1, 13).unwrap());
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(validate_weekly(&[wp(6, f64::NAN)]).is_err());
        assert!(validate_weekly(&[wp(6, f64::INFINITY)]).is_err());
    }

    #[test]
    fn empty_series_is_valid() {
        assert!(validate_weekly(&[]).is_ok());
    }
}
