//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory throughout the pipeline
//! - exported to CSV
//! - rendered by the report/plot layer without conversion

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;

/// A single parsed observation: one raw EIA record reduced to the two fields
/// the pipeline cares about. The `date` here is still the record's own period
/// date; the week normalizer turns it into a canonical week key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// One row of a weekly series: the canonical week key and the aggregated
/// value for that week. A weekly series (`Vec<WeekPoint>`) is unique per
/// `week` and ascending by `week`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekPoint {
    pub week: NaiveDate,
    pub value: f64,
}

/// The join of the two weekly series on a common week key.
///
/// `value_a` is the left (driving) series, `value_b` the matched right
/// series. The smoothed columns are filled in by the rolling-mean step;
/// `None` marks rows without a sufficient window, never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow {
    pub week: NaiveDate,
    pub value_a: f64,
    pub value_b: f64,
    pub value_a_smoothed: Option<f64>,
    pub value_b_smoothed: Option<f64>,
}

impl AlignedRow {
    pub fn new(week: NaiveDate, value_a: f64, value_b: f64) -> Self {
        Self {
            week,
            value_a,
            value_b,
            value_a_smoothed: None,
            value_b_smoothed: None,
        }
    }
}

/// Weekly-key normalization policy.
///
/// Two independently-sampled weekly series from the same provider may anchor
/// their `period` field to different days of the week; making the convention
/// explicit (never inferred) is what makes the later join meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeekPolicy {
    /// Use the record's own date directly as the week key (source is already
    /// weekly-sampled).
    Identity,
    /// Map every date to the Friday that ends its ISO calendar week.
    Friday,
}

/// How duplicate rows within one week are reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Reducer {
    /// Rows are additive sub-categories of one week (e.g., product types).
    Sum,
    /// Rows are repeated samples of one quantity (e.g., a price).
    Mean,
}

/// How the two weekly series are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignMode {
    /// Inner join on identical week keys. Use when both series were
    /// normalized under the same weekly-key policy.
    Exact,
    /// Match each left row to the closest right row within a tolerance.
    /// Tolerates series normalized under slightly different conventions.
    Nearest,
}

/// The two EIA datasets this tool works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    /// Weekly U.S. petroleum product supplied, all products
    /// (`petroleum/cons/wpsup`). Multiple product rows per week.
    Supply,
    /// Weekly WTI crude spot price, series `RWTC` (`petroleum/pri/spt`).
    Wti,
}

impl Dataset {
    /// API route under the EIA v2 base URL.
    pub fn route(self) -> &'static str {
        match self {
            Dataset::Supply => "petroleum/cons/wpsup/data/",
            Dataset::Wti => "petroleum/pri/spt/data/",
        }
    }

    /// Optional `facets[series][]` filter for the route.
    pub fn series_facet(self) -> Option<&'static str> {
        match self {
            Dataset::Supply => None,
            Dataset::Wti => Some("RWTC"),
        }
    }

    /// Reduction applied to rows sharing a week key.
    ///
    /// Supply rows are per-product and additive; WTI rows are duplicate
    /// samples of one price, so averaging is the faithful reduction.
    pub fn reducer(self) -> Reducer {
        match self {
            Dataset::Supply => Reducer::Sum,
            Dataset::Wti => Reducer::Mean,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Dataset::Supply => "Total Product Supplied",
            Dataset::Wti => "WTI Spot Price",
        }
    }

    pub fn unit_label(self) -> &'static str {
        match self {
            Dataset::Supply => "Mbbl/d",
            Dataset::Wti => "USD/bbl",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Inclusive start of the analysis window.
    pub start: NaiveDate,
    /// Optional inclusive end of the analysis window.
    pub end: Option<NaiveDate>,

    /// Rolling-mean window in weeks (1 = no smoothing).
    pub rolling_weeks: usize,
    /// Weekly-key normalization policy applied to both series.
    pub week_policy: WeekPolicy,
    /// Join mode for the two weekly series.
    pub align_mode: AlignMode,
    /// Nearest-mode tolerance in days.
    pub tolerance_days: i64,

    /// Number of most-recent rows shown in tables.
    pub table_rows: usize,

    pub plot: bool,
    pub scatter: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Optional CSV export of the merged table.
    pub export: Option<PathBuf>,
}
