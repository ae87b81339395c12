//! Export weekly results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts, so column names mirror the terminal tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{AlignedRow, Dataset, WeekPoint};
use crate::error::AppError;

/// Write the merged supply/WTI table to a CSV file.
///
/// Smoothed columns are empty (not zero) for warm-up rows without a full
/// rolling window.
pub fn write_merged_csv(path: &Path, rows: &[AlignedRow]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "week,total_petroleum_supply_bpd,wti_usd_per_bbl,supply_ra,wti_ra"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        writeln!(
            file,
            "{},{:.4},{:.4},{},{}",
            row.week,
            row.value_a,
            row.value_b,
            fmt_opt(row.value_a_smoothed),
            fmt_opt(row.value_b_smoothed),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write one weekly series to a CSV file.
pub fn write_weekly_csv(path: &Path, series: &[WeekPoint], dataset: Dataset) -> Result<(), AppError> {
    let column = match dataset {
        Dataset::Supply => "total_product_supplied",
        Dataset::Wti => "wti_price",
    };

    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "week,{column}")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for point in series {
        writeln!(file, "{},{:.4}", point.week, point.value)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.4}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn merged_csv_has_empty_fields_for_warmup_rows() {
        let dir = std::env::temp_dir();
        let path = dir.join("eiaw_merged_test.csv");

        let mut rows = vec![
            AlignedRow::new(NaiveDate::from_ymd_opt(2020, 3, 6).unwrap(), 19000.0, 41.28),
            AlignedRow::new(NaiveDate::from_ymd_opt(2020, 3, 13).unwrap(), 19500.0, 31.73),
        ];
        rows[1].value_a_smoothed = Some(19250.0);
        rows[1].value_b_smoothed = Some(36.505);

        write_merged_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "week,total_petroleum_supply_bpd,wti_usd_per_bbl,supply_ra,wti_ra"
        );
        assert_eq!(lines[1], "2020-03-06,19000.0000,41.2800,,");
        assert_eq!(lines[2], "2020-03-13,19500.0000,31.7300,19250.0000,36.5050");
    }

    #[test]
    fn weekly_csv_column_follows_dataset() {
        let dir = std::env::temp_dir();
        let path = dir.join("eiaw_weekly_test.csv");

        let series = vec![WeekPoint {
            week: NaiveDate::from_ymd_opt(2012, 1, 6).unwrap(),
            value: 100.25,
        }];

        write_weekly_csv(&path, &series, Dataset::Wti).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "week,wti_price");
        assert_eq!(lines[1], "2012-01-06,100.2500");
    }
}
