//! Record parsing: loosely-typed EIA records → typed observations.
//!
//! Design goals:
//! - **Best-effort**: a record whose period or value does not convert is
//!   dropped, never repaired and never fatal — malformed upstream rows must
//!   not abort the pipeline.
//! - **Diagnostics without noise**: drops are counted, not logged per row.
//! - **Deterministic**: a fixed set of accepted period formats, no locale or
//!   heuristic parsing.

use chrono::{NaiveDate, Weekday};
use serde_json::Value;

use crate::data::eia::RawRecord;
use crate::domain::Observation;

/// Parser output: surviving rows plus drop diagnostics.
///
/// Output row order follows input order; downstream stages impose their own
/// ordering, so callers must not rely on it.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub rows: Vec<Observation>,
    pub records_read: usize,
    pub records_dropped: usize,
}

/// Parse a sequence of raw records into observations.
///
/// `period_field` and `value_field` name the record keys to interpret as the
/// calendar date and the numeric value. A record missing either key counts
/// as a drop, same as one whose values fail conversion.
pub fn parse_records(records: &[RawRecord], period_field: &str, value_field: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for record in records {
        outcome.records_read += 1;

        let date = record.get(period_field).and_then(parse_period);
        let value = record.get(value_field).and_then(parse_value);

        match (date, value) {
            (Some(date), Some(value)) => outcome.rows.push(Observation { date, value }),
            _ => outcome.records_dropped += 1,
        }
    }

    outcome
}

/// Interpret a scalar as a calendar date.
///
/// Accepted forms: `YYYY-MM-DD`, `YYYY/MM/DD`, and ISO year-week `YYYY-Www`
/// (anchored to that week's Friday, the EIA weekly reporting day).
fn parse_period(v: &Value) -> Option<NaiveDate> {
    let s = v.as_str()?.trim();
    if s.is_empty() {
        return None;
    }

    const FMTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    parse_year_week(s)
}

/// Parse `YYYY-Www` (e.g. `2012-W01`) into that ISO week's Friday.
fn parse_year_week(s: &str) -> Option<NaiveDate> {
    let (year, week) = s.split_once("-W")?;
    let year: i32 = year.parse().ok()?;
    let week: u32 = week.parse().ok()?;
    NaiveDate::from_isoywd_opt(year, week, Weekday::Fri)
}

/// Interpret a scalar as a finite floating-point value.
///
/// JSON numbers pass through; strings are trimmed and parsed. EIA uses
/// textual sentinels for missing or withheld values (`""`, `"."`, `"W"`,
/// `"NA"`); all of them simply fail the parse and drop the row.
fn parse_value(v: &Value) -> Option<f64> {
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "." {
                return None;
            }
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }?;

    if parsed.is_finite() { Some(parsed) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(period: Value, value: Value) -> RawRecord {
        let mut m = RawRecord::new();
        m.insert("period".to_string(), period);
        m.insert("value".to_string(), value);
        m
    }

    #[test]
    fn keeps_only_rows_where_both_fields_convert() {
        let records = vec![
            record(json!("2012-01-06"), json!("100")),
            record(json!("not-a-date"), json!("200")),
            record(json!("2012-01-13"), json!("abc")),
        ];

        let outcome = parse_records(&records, "period", "value");
        assert_eq!(outcome.records_read, 3);
        assert_eq!(outcome.records_dropped, 2);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(
            outcome.rows[0],
            Observation {
                date: NaiveDate::from_ymd_opt(2012, 1, 6).unwrap(),
                value: 100.0,
            }
        );
    }

    #[test]
    fn output_never_exceeds_input_length() {
        let records = vec![
            record(json!("2012-01-06"), json!(1.5)),
            record(json!("2012-01-13"), json!(null)),
        ];
        let outcome = parse_records(&records, "period", "value");
        assert!(outcome.rows.len() <= records.len());
    }

    #[test]
    fn accepts_json_numbers_and_numeric_strings() {
        let records = vec![
            record(json!("2012-01-06"), json!(42)),
            record(json!("2012-01-13"), json!(" 7.25 ")),
        ];
        let outcome = parse_records(&records, "period", "value");
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].value, 42.0);
        assert_eq!(outcome.rows[1].value, 7.25);
    }

    #[test]
    fn drops_sentinel_and_non_finite_values() {
        let records = vec![
            record(json!("2012-01-06"), json!(".")),
            record(json!("2012-01-13"), json!("")),
            record(json!("2012-01-20"), json!("W")),
            record(json!("2012-01-27"), json!("inf")),
        ];
        let outcome = parse_records(&records, "period", "value");
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.records_dropped, 4);
    }

    #[test]
    fn parses_iso_year_week_to_friday() {
        let records = vec![record(json!("2012-W01"), json!("5"))];
        let outcome = parse_records(&records, "period", "value");
        assert_eq!(outcome.rows.len(), 1);
        // ISO week 1 of 2012 runs Mon 2012-01-02 .. Sun 2012-01-08.
        assert_eq!(
            outcome.rows[0].date,
            NaiveDate::from_ymd_opt(2012, 1, 6).unwrap()
        );
    }

    #[test]
    fn missing_fields_count_as_drops() {
        let mut only_period = RawRecord::new();
        only_period.insert("period".to_string(), json!("2012-01-06"));
        let outcome = parse_records(&[only_period], "period", "value");
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.records_dropped, 1);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let outcome = parse_records(&[], "period", "value");
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.records_read, 0);
    }
}
