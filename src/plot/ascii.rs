//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - trend chart: supply polyline `*`, WTI polyline `+`, each series scaled to
//!   its own y-range so both fill the grid
//! - scatter chart: one `o` per matched week (x = WTI, y = supply)
//! - single-series chart: `-` polyline with `o` week markers

use chrono::NaiveDate;

use crate::domain::{AlignedRow, Dataset, WeekPoint};

/// Render both series over time on one grid.
///
/// Rows without a smoothed value (the rolling-window warm-up) are skipped, so
/// the chart always shows the same columns the table reports.
pub fn render_trend(rows: &[AlignedRow], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let supply: Vec<(NaiveDate, f64)> = rows
        .iter()
        .filter_map(|r| r.value_a_smoothed.map(|v| (r.week, v)))
        .collect();
    let wti: Vec<(NaiveDate, f64)> = rows
        .iter()
        .filter_map(|r| r.value_b_smoothed.map(|v| (r.week, v)))
        .collect();

    let Some((first, last)) = week_range(rows) else {
        return "Trend: no rows to plot\n".to_string();
    };
    let Some((s_min, s_max)) = value_range(supply.iter().map(|&(_, v)| v)) else {
        return "Trend: no rows to plot\n".to_string();
    };
    let Some((w_min, w_max)) = value_range(wti.iter().map(|&(_, v)| v)) else {
        return "Trend: no rows to plot\n".to_string();
    };
    let (s_min, s_max) = pad_range(s_min, s_max, 0.05);
    let (w_min, w_max) = pad_range(w_min, w_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    // Supply is drawn first; where the polylines cross, supply wins.
    draw_series(&mut grid, &supply, first, last, s_min, s_max, '*');
    draw_series(&mut grid, &wti, first, last, w_min, w_max, '+');

    let mut out = String::new();
    out.push_str(&format!(
        "Trend: weeks [{first}, {last}] | supply(*)=[{s_min:.0}, {s_max:.0}] {} | wti(+)=[{w_min:.2}, {w_max:.2}] {}\n",
        Dataset::Supply.unit_label(),
        Dataset::Wti.unit_label(),
    ));
    push_grid(&mut out, grid);
    out
}

/// Render one point per matched week: x = WTI price, y = supply.
pub fn render_scatter(rows: &[AlignedRow], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = value_range(rows.iter().map(|r| r.value_b)) else {
        return "Scatter: no rows to plot\n".to_string();
    };
    let Some((y_min, y_max)) = value_range(rows.iter().map(|r| r.value_a)) else {
        return "Scatter: no rows to plot\n".to_string();
    };
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for r in rows {
        let x = map_x(r.value_b, x_min, x_max, width);
        let y = map_y(r.value_a, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Scatter: x wti=[{x_min:.2}, {x_max:.2}] {} | y supply=[{y_min:.0}, {y_max:.0}] {}\n",
        Dataset::Wti.unit_label(),
        Dataset::Supply.unit_label(),
    ));
    push_grid(&mut out, grid);
    out
}

/// Render a single weekly series as a line with week markers.
pub fn render_weekly(series: &[WeekPoint], dataset: Dataset, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(NaiveDate, f64)> = series.iter().map(|p| (p.week, p.value)).collect();
    let (Some(&(first, _)), Some(&(last, _))) = (points.first(), points.last()) else {
        return "Plot: no rows to plot\n".to_string();
    };
    let Some((y_min, y_max)) = value_range(points.iter().map(|&(_, v)| v)) else {
        return "Plot: no rows to plot\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    draw_series(&mut grid, &points, first, last, y_min, y_max, '-');
    for &(week, value) in &points {
        let x = map_week(week, first, last, width);
        let y = map_y(value, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | weeks [{first}, {last}] | y=[{y_min:.2}, {y_max:.2}] {}\n",
        dataset.display_name(),
        dataset.unit_label(),
    ));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn week_range(rows: &[AlignedRow]) -> Option<(NaiveDate, NaiveDate)> {
    match (rows.first(), rows.last()) {
        (Some(first), Some(last)) if last.week > first.week => Some((first.week, last.week)),
        _ => None,
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_week(week: NaiveDate, first: NaiveDate, last: NaiveDate, width: usize) -> usize {
    let span = (last - first).num_days().max(1) as f64;
    let t = (week - first).num_days() as f64;
    map_x(t, 0.0, span, width)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(
    grid: &mut [Vec<char>],
    points: &[(NaiveDate, f64)],
    first: NaiveDate,
    last: NaiveDate,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(week, value) in points {
        let x = map_week(week, first, last, width);
        let y = map_y(value, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        } else if grid[y][x] == ' ' {
            grid[y][x] = ch;
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Writes only to blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
