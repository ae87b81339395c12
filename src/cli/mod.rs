//! Command-line parsing for the EIA weekly comparison tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{AlignMode, WeekPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "eiaw",
    version,
    about = "Weekly U.S. petroleum product supplied vs WTI spot price (EIA API v2)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch both datasets, align them weekly, and print metrics, the merged
    /// table, and terminal charts.
    Report(ReportArgs),
    /// Weekly total petroleum product supplied (all products summed).
    Supply(SeriesArgs),
    /// Weekly WTI crude spot price (series RWTC).
    Wti(SeriesArgs),
}

/// Options for the two-series comparison.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Inclusive start of the analysis window (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg, default_value = "2018-01-01")]
    pub start: NaiveDate,

    /// Optional inclusive end of the window (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Rolling-average window in weeks, 1..=52 (1 = raw values).
    #[arg(long, default_value_t = 1)]
    pub rolling: usize,

    /// Weekly-key normalization applied to both series.
    #[arg(long = "week-policy", value_enum, default_value_t = WeekPolicy::Identity)]
    pub week_policy: WeekPolicy,

    /// How the two weekly series are joined.
    #[arg(long, value_enum, default_value_t = AlignMode::Nearest)]
    pub align: AlignMode,

    /// Tolerance in days for `--align nearest`.
    #[arg(long = "tolerance-days", default_value_t = 7)]
    pub tolerance_days: i64,

    /// Number of most-recent rows shown in the merged table.
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    /// Render the dual-series trend chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the trend chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Render the supply-vs-WTI scatter chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub scatter: bool,

    /// Disable the scatter chart.
    #[arg(long)]
    pub no_scatter: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the merged table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for a single weekly series.
#[derive(Debug, Parser, Clone)]
pub struct SeriesArgs {
    /// Inclusive start of the analysis window (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg, default_value = "2012-01-01")]
    pub start: NaiveDate,

    /// Optional inclusive end of the window (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Weekly-key normalization policy.
    #[arg(long = "week-policy", value_enum, default_value_t = WeekPolicy::Identity)]
    pub week_policy: WeekPolicy,

    /// Number of most-recent rows shown in the table.
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    /// Render the trend chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the trend chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the weekly series to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}
