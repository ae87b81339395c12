//! Shared pipeline logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> parse -> normalize weeks -> aggregate -> filter -> validate ->
//! align -> derived statistics
//!
//! The CLI front-end then focuses on presentation (messages, tables, plots).
//! Each `run_*` function has a `_with_records` twin that skips the network,
//! which is what the tests use.

use crate::data::eia::{EiaClient, RawRecord};
use crate::domain::{Dataset, RunConfig, WeekPoint};
use crate::error::AppError;
use crate::series::{
    aggregate, align, apply_rolling, filter_range, latest_value, normalize_weeks, parse_records,
    pearson, validate_weekly,
};

/// Record keys the EIA weekly routes use for the period and the value.
const PERIOD_FIELD: &str = "period";
const VALUE_FIELD: &str = "value";

/// Widest accepted rolling window: one year of weekly rows.
const MAX_ROLLING_WEEKS: usize = 52;

/// Ingest diagnostics for one dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestStats {
    pub records_read: usize,
    pub records_dropped: usize,
}

/// One cleaned weekly series plus its ingest diagnostics.
#[derive(Debug, Clone)]
pub struct SeriesOutput {
    pub weekly: Vec<WeekPoint>,
    pub ingest: IngestStats,
}

/// Scalar metrics over the merged table.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    pub weeks: usize,
    pub latest_supply: f64,
    pub latest_wti: f64,
    /// Pearson correlation; NaN when undefined (reported as "n/a").
    pub correlation: f64,
}

/// All computed outputs of a full `eiaw report` run.
///
/// `merged` may legitimately be empty (no overlapping weeks); `metrics` is
/// `None` exactly in that case, and the shell decides the messaging.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub supply: SeriesOutput,
    pub wti: SeriesOutput,
    pub merged: Vec<crate::domain::AlignedRow>,
    pub metrics: Option<Metrics>,
}

/// Output of a single-series run (`eiaw supply` / `eiaw wti`).
#[derive(Debug, Clone)]
pub struct SeriesRun {
    pub dataset: Dataset,
    pub output: SeriesOutput,
    /// Value at the most recent week; `None` when the series is empty.
    pub latest: Option<f64>,
}

/// Fetch both datasets and execute the full comparison pipeline.
pub fn run_report(config: &RunConfig) -> Result<RunOutput, AppError> {
    let client = EiaClient::from_env()?;
    let supply_records = client.fetch_records(Dataset::Supply)?;
    let wti_records = client.fetch_records(Dataset::Wti)?;

    run_report_with_records(config, &supply_records, &wti_records)
}

/// Execute the comparison pipeline on pre-fetched records.
pub fn run_report_with_records(
    config: &RunConfig,
    supply_records: &[RawRecord],
    wti_records: &[RawRecord],
) -> Result<RunOutput, AppError> {
    check_config(config)?;

    let supply = build_weekly(supply_records, Dataset::Supply, config)?;
    let wti = build_weekly(wti_records, Dataset::Wti, config)?;

    let mut merged = align(
        &supply.weekly,
        &wti.weekly,
        config.align_mode,
        config.tolerance_days,
    );
    apply_rolling(&mut merged, config.rolling_weeks);

    let metrics = if merged.is_empty() {
        None
    } else {
        let supply_col: Vec<WeekPoint> = merged
            .iter()
            .map(|r| WeekPoint {
                week: r.week,
                value: r.value_a,
            })
            .collect();
        let wti_col: Vec<WeekPoint> = merged
            .iter()
            .map(|r| WeekPoint {
                week: r.week,
                value: r.value_b,
            })
            .collect();

        Some(Metrics {
            weeks: merged.len(),
            latest_supply: latest_value(&supply_col)?,
            latest_wti: latest_value(&wti_col)?,
            correlation: pearson(&merged),
        })
    };

    Ok(RunOutput {
        supply,
        wti,
        merged,
        metrics,
    })
}

/// Fetch one dataset and clean it into a weekly series.
pub fn run_series(config: &RunConfig, dataset: Dataset) -> Result<SeriesRun, AppError> {
    let client = EiaClient::from_env()?;
    let records = client.fetch_records(dataset)?;
    run_series_with_records(config, dataset, &records)
}

/// Execute the single-series pipeline on pre-fetched records.
pub fn run_series_with_records(
    config: &RunConfig,
    dataset: Dataset,
    records: &[RawRecord],
) -> Result<SeriesRun, AppError> {
    check_config(config)?;

    let output = build_weekly(records, dataset, config)?;
    let latest = if output.weekly.is_empty() {
        None
    } else {
        Some(latest_value(&output.weekly)?)
    };

    Ok(SeriesRun {
        dataset,
        output,
        latest,
    })
}

/// Run one dataset through parse -> week key -> aggregate -> filter ->
/// validate. The result may be empty; emptiness is a state for the caller
/// to branch on, not an error.
fn build_weekly(
    records: &[RawRecord],
    dataset: Dataset,
    config: &RunConfig,
) -> Result<SeriesOutput, AppError> {
    let parsed = parse_records(records, PERIOD_FIELD, VALUE_FIELD);
    let normalized = normalize_weeks(&parsed.rows, config.week_policy);
    let weekly = aggregate(&normalized, dataset.reducer());
    let weekly = filter_range(&weekly, config.start, config.end);

    validate_weekly(&weekly)?;

    Ok(SeriesOutput {
        weekly,
        ingest: IngestStats {
            records_read: parsed.records_read,
            records_dropped: parsed.records_dropped,
        },
    })
}

fn check_config(config: &RunConfig) -> Result<(), AppError> {
    // `start == end` is a valid one-week window; the range filter is
    // inclusive on both ends.
    if let Some(end) = config.end {
        if config.start > end {
            return Err(AppError::new(2, "Start date must not be after end date."));
        }
    }
    if !(1..=MAX_ROLLING_WEEKS).contains(&config.rolling_weeks) {
        return Err(AppError::new(
            2,
            format!("Rolling window must be between 1 and {MAX_ROLLING_WEEKS} weeks."),
        ));
    }
    if config.tolerance_days < 0 {
        return Err(AppError::new(2, "Alignment tolerance must be >= 0 days."));
    }
    Ok(())
}
