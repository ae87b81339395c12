//! Weekly aggregation: many rows per week key → exactly one.

use std::collections::BTreeMap;

use crate::domain::{Observation, Reducer, WeekPoint};

/// Group observations by their (already normalized) week key and reduce each
/// group to a single value.
///
/// Output is ascending by week with one row per distinct key; empty input
/// yields empty output.
pub fn aggregate(rows: &[Observation], reducer: Reducer) -> Vec<WeekPoint> {
    let mut groups: BTreeMap<chrono::NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.date).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(week, (sum, count))| {
            let value = match reducer {
                Reducer::Sum => sum,
                Reducer::Mean => sum / count as f64,
            };
            WeekPoint { week, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(day: u32, value: f64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2012, 1, day).unwrap(),
            value,
        }
    }

    #[test]
    fn sum_reduces_duplicate_weeks() {
        let rows = vec![obs(6, 10.0), obs(6, 7.0), obs(13, 3.0)];
        let out = aggregate(&rows, Reducer::Sum);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].week, NaiveDate::from_ymd_opt(2012, 1, 6).unwrap());
        assert_eq!(out[0].value, 17.0);
        assert_eq!(out[1].week, NaiveDate::from_ymd_opt(2012, 1, 13).unwrap());
        assert_eq!(out[1].value, 3.0);
    }

    #[test]
    fn mean_reduces_repeated_samples() {
        let rows = vec![obs(6, 10.0), obs(6, 20.0)];
        let out = aggregate(&rows, Reducer::Mean);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 15.0);
    }

    #[test]
    fn output_is_sorted_and_unique_regardless_of_input_order() {
        let rows = vec![obs(20, 1.0), obs(6, 2.0), obs(13, 3.0), obs(6, 4.0)];
        let out = aggregate(&rows, Reducer::Sum);

        let weeks: Vec<_> = out.iter().map(|p| p.week).collect();
        let mut sorted = weeks.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(weeks, sorted);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate(&[], Reducer::Sum).is_empty());
        assert!(aggregate(&[], Reducer::Mean).is_empty());
    }
}
