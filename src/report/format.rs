//! Formatted terminal output for the report and series subcommands.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::app::pipeline::{RunOutput, SeriesRun};
use crate::domain::{AlignMode, AlignedRow, Dataset, RunConfig, WeekPoint, WeekPolicy};

/// Format the full comparison summary (window, ingest counters, metrics).
pub fn format_report_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== eiaw - Weekly Petroleum Supply vs WTI (EIA API v2) ===\n");
    out.push_str(&format!("Window: {}\n", fmt_window(config.start, config.end)));
    out.push_str(&format!(
        "Week policy: {} | Align: {}\n",
        week_policy_label(config.week_policy),
        align_label(config.align_mode, config.tolerance_days),
    ));
    if config.rolling_weeks > 1 {
        out.push_str(&format!("Rolling mean: {} weeks\n", config.rolling_weeks));
    }

    out.push_str(&format!(
        "{}: {} weeks (read {} records, dropped {})\n",
        Dataset::Supply.display_name(),
        run.supply.weekly.len(),
        run.supply.ingest.records_read,
        run.supply.ingest.records_dropped,
    ));
    out.push_str(&format!(
        "{}: {} weeks (read {} records, dropped {})\n",
        Dataset::Wti.display_name(),
        run.wti.weekly.len(),
        run.wti.ingest.records_read,
        run.wti.ingest.records_dropped,
    ));

    if let Some(metrics) = &run.metrics {
        out.push_str(&format!("Matched weeks: {}\n", metrics.weeks));
        out.push_str(&format!(
            "Latest supply: {:.0} {}\n",
            metrics.latest_supply,
            Dataset::Supply.unit_label()
        ));
        out.push_str(&format!(
            "Latest WTI: {:.2} {}\n",
            metrics.latest_wti,
            Dataset::Wti.unit_label()
        ));
        out.push_str(&format!(
            "Correlation (supply vs WTI): {}\n",
            fmt_correlation(metrics.correlation)
        ));
    }

    out
}

/// Format a single-series summary.
pub fn format_series_summary(run: &SeriesRun, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== eiaw - {} (EIA API v2) ===\n", run.dataset.display_name()));
    out.push_str(&format!("Window: {}\n", fmt_window(config.start, config.end)));
    out.push_str(&format!(
        "Weeks: {} (read {} records, dropped {})\n",
        run.output.weekly.len(),
        run.output.ingest.records_read,
        run.output.ingest.records_dropped,
    ));
    if let Some(latest) = run.latest {
        out.push_str(&format!(
            "Latest: {} {}\n",
            fmt_value(latest, run.dataset),
            run.dataset.unit_label()
        ));
    }

    out
}

/// Format the merged table, most recent weeks first.
pub fn format_merged_table(rows: &[AlignedRow], limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:>12} {:>10} {:>12} {:>10}\n",
        "week", "supply", "wti", "supply_ra", "wti_ra"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<12} {:-<10} {:-<12} {:-<10}\n",
        "", "", "", "", ""
    ));

    for row in rows.iter().rev().take(limit) {
        out.push_str(&format!(
            "{:<12} {:>12.0} {:>10.2} {:>12} {:>10}\n",
            row.week,
            row.value_a,
            row.value_b,
            fmt_opt(row.value_a_smoothed, 0),
            fmt_opt(row.value_b_smoothed, 2),
        ));
    }
    if rows.len() > limit {
        out.push_str(&format!("({} earlier weeks not shown)\n", rows.len() - limit));
    }

    out
}

/// Format a single weekly series as a table, most recent weeks first.
pub fn format_weekly_table(series: &[WeekPoint], dataset: Dataset, limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<12} {:>14}\n", "week", dataset.unit_label()));
    out.push_str(&format!("{:-<12} {:-<14}\n", "", ""));

    for point in series.iter().rev().take(limit) {
        out.push_str(&format!(
            "{:<12} {:>14}\n",
            point.week,
            fmt_value(point.value, dataset)
        ));
    }
    if series.len() > limit {
        out.push_str(&format!("({} earlier weeks not shown)\n", series.len() - limit));
    }

    out
}

fn fmt_window(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) => format!("{start} to {end}"),
        None => format!("{start} to latest"),
    }
}

fn fmt_correlation(r: f64) -> String {
    if r.is_nan() {
        "n/a (insufficient overlap)".to_string()
    } else {
        format!("{r:.2}")
    }
}

fn fmt_value(v: f64, dataset: Dataset) -> String {
    match dataset {
        Dataset::Supply => format!("{v:.0}"),
        Dataset::Wti => format!("{v:.2}"),
    }
}

fn fmt_opt(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

fn week_policy_label(policy: WeekPolicy) -> &'static str {
    match policy {
        WeekPolicy::Identity => "source dates",
        WeekPolicy::Friday => "week ending Friday",
    }
}

fn align_label(mode: AlignMode, tolerance_days: i64) -> String {
    match mode {
        AlignMode::Exact => "exact week match".to_string(),
        AlignMode::Nearest => format!("nearest within {tolerance_days}d"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, supply: f64, wti: f64) -> AlignedRow {
        AlignedRow::new(NaiveDate::from_ymd_opt(2020, 3, day).unwrap(), supply, wti)
    }

    #[test]
    fn merged_table_is_recent_first_and_limited() {
        let rows = vec![row(6, 19000.0, 41.28), row(13, 19500.0, 31.73), row(20, 17800.0, 25.03)];
        let table = format_merged_table(&rows, 2);

        let week_lines: Vec<&str> = table
            .lines()
            .filter(|l| l.starts_with("2020-"))
            .collect();
        assert_eq!(week_lines.len(), 2);
        assert!(week_lines[0].starts_with("2020-03-20"));
        assert!(week_lines[1].starts_with("2020-03-13"));
        assert!(table.contains("(1 earlier weeks not shown)"));
    }

    #[test]
    fn merged_table_renders_missing_smoothed_values_as_dash() {
        let mut rows = vec![row(6, 19000.0, 41.28), row(13, 19500.0, 31.73)];
        rows[1].value_a_smoothed = Some(19250.0);
        rows[1].value_b_smoothed = Some(36.5);
        let table = format_merged_table(&rows, 10);

        let first = table.lines().find(|l| l.starts_with("2020-03-06")).unwrap();
        assert!(first.trim_end().ends_with('-'));
        let second = table.lines().find(|l| l.starts_with("2020-03-13")).unwrap();
        assert!(second.contains("19250"));
        assert!(second.contains("36.50"));
    }

    #[test]
    fn correlation_formats_nan_as_not_available() {
        assert_eq!(fmt_correlation(f64::NAN), "n/a (insufficient overlap)");
        assert_eq!(fmt_correlation(-0.735), "-0.73");
    }

    #[test]
    fn weekly_table_uses_dataset_precision() {
        let series = vec![WeekPoint {
            week: NaiveDate::from_ymd_opt(2012, 1, 6).unwrap(),
            value: 18877.4,
        }];
        let supply = format_weekly_table(&series, Dataset::Supply, 5);
        assert!(supply.contains("18877"));
        assert!(!supply.contains("18877.4"));

        let wti = format_weekly_table(&series, Dataset::Wti, 5);
        assert!(wti.contains("18877.40"));
    }
}
