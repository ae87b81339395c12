//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches EIA data
//! - runs the weekly cleaning + alignment pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ReportArgs, SeriesArgs};
use crate::domain::{AlignMode, Dataset, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `eiaw` binary.
pub fn run() -> Result<(), AppError> {
    // We want `eiaw` and `eiaw --start 2020-01-01` to behave like
    // `eiaw report ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Supply(args) => handle_series(Dataset::Supply, args),
        Command::Wti(args) => handle_series(Dataset::Wti, args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = run_config_from_report_args(&args);
    let run = pipeline::run_report(&config)?;

    if run.supply.weekly.is_empty() {
        return Err(AppError::new(
            3,
            "No petroleum supply rows in the selected window. Try an earlier start date.",
        ));
    }
    if run.wti.weekly.is_empty() {
        return Err(AppError::new(
            3,
            "No WTI price rows in the selected window. Try an earlier start date.",
        ));
    }
    if run.merged.is_empty() {
        return Err(AppError::new(
            3,
            "No overlapping weeks after matching. Try expanding the date range.",
        ));
    }

    println!("{}", crate::report::format_report_summary(&run, &config));
    println!(
        "{}",
        crate::report::format_merged_table(&run.merged, config.table_rows)
    );

    if config.plot {
        let plot =
            crate::plot::render_trend(&run.merged, config.plot_width, config.plot_height);
        println!("{plot}");
    }
    if config.scatter {
        let plot =
            crate::plot::render_scatter(&run.merged, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export {
        crate::io::export::write_merged_csv(path, &run.merged)?;
        println!("Exported merged table to {}", path.display());
    }

    Ok(())
}

fn handle_series(dataset: Dataset, args: SeriesArgs) -> Result<(), AppError> {
    let config = run_config_from_series_args(&args);
    let run = pipeline::run_series(&config, dataset)?;

    if run.output.weekly.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No {} rows in the selected window. Try an earlier start date.",
                dataset.display_name()
            ),
        ));
    }

    println!("{}", crate::report::format_series_summary(&run, &config));
    println!(
        "{}",
        crate::report::format_weekly_table(&run.output.weekly, dataset, config.table_rows)
    );

    if config.plot {
        let plot = crate::plot::render_weekly(
            &run.output.weekly,
            dataset,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export {
        crate::io::export::write_weekly_csv(path, &run.output.weekly, dataset)?;
        println!("Exported weekly series to {}", path.display());
    }

    Ok(())
}

pub fn run_config_from_report_args(args: &ReportArgs) -> RunConfig {
    RunConfig {
        start: args.start,
        end: args.end,
        rolling_weeks: args.rolling,
        week_policy: args.week_policy,
        align_mode: args.align,
        tolerance_days: args.tolerance_days,
        table_rows: args.rows,
        plot: args.plot && !args.no_plot,
        scatter: args.scatter && !args.no_scatter,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

pub fn run_config_from_series_args(args: &SeriesArgs) -> RunConfig {
    RunConfig {
        start: args.start,
        end: args.end,
        rolling_weeks: 1,
        week_policy: args.week_policy,
        // Single-series runs never align; the mode is inert.
        align_mode: AlignMode::Exact,
        tolerance_days: 0,
        table_rows: args.rows,
        plot: args.plot && !args.no_plot,
        scatter: false,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

/// Rewrite argv so `eiaw` defaults to `eiaw report`.
///
/// Rules:
/// - `eiaw`                       -> `eiaw report`
/// - `eiaw --start 2020-01-01`    -> `eiaw report --start 2020-01-01`
/// - `eiaw --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "supply" | "wti");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_report() {
        assert_eq!(rewrite_args(argv(&["eiaw"])), argv(&["eiaw", "report"]));
    }

    #[test]
    fn leading_flag_becomes_report_flag() {
        assert_eq!(
            rewrite_args(argv(&["eiaw", "--start", "2020-01-01"])),
            argv(&["eiaw", "report", "--start", "2020-01-01"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["eiaw", "wti", "--rows", "4"])),
            argv(&["eiaw", "wti", "--rows", "4"])
        );
        assert_eq!(rewrite_args(argv(&["eiaw", "--help"])), argv(&["eiaw", "--help"]));
    }
}
