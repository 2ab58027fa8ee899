//! Dashboard rendering using terminal output.

use std::fmt::Write;

use crate::aggregation::{SeriesKey, SeriesRow, SummaryRow};
use crate::view::{Dashboard, DashboardState};

use super::charts::{build_charts, date_range, Chart};
use super::color::{ansi_fg, parse_hex_color, series_rgb, SUMMARY_FILL};


// Constants
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 20;
const BOX_WIDTH: usize = 76;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NO_DATA_MESSAGE: &str = "No data available";


/// Format number with thousands separator and appropriate suffix.
fn format_number(num: i64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 10_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        format!("{}", num)
    }
}


/// Create a simple text bar for visualization.
fn create_bar(value: i64, max_value: i64, width: usize, color: &str) -> String {
    if max_value <= 0 {
        return format!("{}{}{}", DIM, "░".repeat(width), RESET);
    }

    let filled = ((value.max(0) as f64 / max_value as f64) * width as f64) as usize;
    let filled = filled.min(width);

    format!(
        "{}{}{}{}{}",
        color,
        "█".repeat(filled),
        RESET,
        DIM,
        "░".repeat(width - filled),
    ) + RESET
}


/// Sparkline for a series of values, scaled to its own max.
fn sparkline(values: &[i64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&v| {
            if max <= 0 || v <= 0 {
                SPARK_LEVELS[0]
            } else {
                let idx = (v as f64 / max as f64 * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}


/// Truncate a label to the label column.
fn fit_label(label: &str) -> String {
    label.chars().take(LABEL_WIDTH).collect()
}


/// Render the complete dashboard into a string.
pub fn render_dashboard(dashboard: &Dashboard, source: &str) -> String {
    let mut out = String::new();

    match &dashboard.state {
        DashboardState::Loading => {
            let _ = writeln!(out, "{}", LOADING_MESSAGE);
            return out;
        }
        DashboardState::Empty => {
            let _ = writeln!(out, "{}", NO_DATA_MESSAGE);
            return out;
        }
        DashboardState::Ready(_) => {}
    }

    render_header(&mut out, dashboard);

    let charts = build_charts(dashboard);
    if charts.is_empty() {
        let _ = writeln!(
            out,
            "{}No chart to show: the line chart needs a single developer selected.{}",
            DIM, RESET
        );
        let _ = writeln!(out);
    }

    for chart in &charts {
        match chart {
            Chart::Summary { rows, .. } => render_summary(&mut out, &chart.title(), rows),
            Chart::DeveloperLine { legend, series, .. } => {
                render_developer_lines(&mut out, &chart.title(), legend, series)
            }
            Chart::DeveloperBar { legend, series, .. } => {
                render_developer_bars(&mut out, &chart.title(), legend, series)
            }
        }
        let _ = writeln!(out);
    }

    render_footer(&mut out, date_range(dashboard.state.roster()).as_deref(), source);
    out
}


/// Render the title and the current selector values.
fn render_header(out: &mut String, dashboard: &Dashboard) {
    let border = "─".repeat(BOX_WIDTH);
    let _ = writeln!(out, "┌{}┐", border);
    let _ = writeln!(out, "│{}{:^76}{}│", BOLD, "Weekly Developer Activity", RESET);
    let _ = writeln!(out, "└{}┘", border);
    let _ = writeln!(
        out,
        "Developer: {}{}{}    Graph Type: {}{}{}",
        CYAN,
        dashboard.view.selected_developer.option_label(),
        RESET,
        CYAN,
        dashboard.view.graph_type.option_label(),
        RESET,
    );
    let _ = writeln!(out);
}


/// Open a titled box.
fn box_top(out: &mut String, title: &str) {
    let _ = writeln!(out, "┌{}┐", "─".repeat(BOX_WIDTH));
    let _ = writeln!(out, "│ {}{:<75}{}│", BOLD, fit_title(title), RESET);
    let _ = writeln!(out, "├{}┤", "─".repeat(BOX_WIDTH));
}


fn box_bottom(out: &mut String) {
    let _ = writeln!(out, "└{}┘", "─".repeat(BOX_WIDTH));
}


fn fit_title(title: &str) -> String {
    title.chars().take(BOX_WIDTH - 1).collect()
}


/// Render metric totals as horizontal bars.
fn render_summary(out: &mut String, title: &str, rows: &[SummaryRow]) {
    let max_value = rows.iter().map(|r| r.value).max().unwrap_or(0);
    let color = parse_hex_color(SUMMARY_FILL).map(ansi_fg).unwrap_or_default();

    box_top(out, title);
    for row in rows {
        let _ = writeln!(
            out,
            "│ {:20} {} {}{:>10}{}             │",
            fit_label(&row.name),
            create_bar(row.value, max_value, BAR_WIDTH, &color),
            BOLD,
            format_number(row.value),
            RESET,
        );
    }
    box_bottom(out);
}


/// Render one sparkline per metric across the developer's days.
fn render_developer_lines(out: &mut String, title: &str, legend: &[SeriesKey], series: &[SeriesRow]) {
    box_top(out, title);

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        let _ = writeln!(
            out,
            "│ {}{:<75}{}│",
            DIM,
            format!("{} days: {} to {}", series.len(), first.date, last.date),
            RESET
        );
    }

    for (index, key) in legend.iter().enumerate() {
        let values: Vec<i64> = series.iter().map(|row| row.value(&key.label)).collect();
        let peak = values.iter().copied().max().unwrap_or(0);
        let total = values.iter().copied().fold(0, i64::saturating_add);
        let color = ansi_fg(series_rgb(&key.fill_color, index));
        let spark = sparkline(&values);
        let peak_text = format_number(peak);
        let total_text = format_number(total);
        let used = 2 + LABEL_WIDTH + spark.chars().count()
            + 6 + peak_text.chars().count().max(5)
            + 7 + total_text.chars().count().max(6);

        let _ = writeln!(
            out,
            "│ {:20} {}{}{} peak {}{:>5}{} total {}{:>6}{}{}│",
            fit_label(&key.label),
            color,
            spark,
            RESET,
            CYAN,
            peak_text,
            RESET,
            BOLD,
            total_text,
            RESET,
            " ".repeat(BOX_WIDTH.saturating_sub(used)),
        );
    }
    box_bottom(out);
}


/// Render grouped bars: one group per day, one bar per metric.
fn render_developer_bars(out: &mut String, title: &str, legend: &[SeriesKey], series: &[SeriesRow]) {
    let max_value = series
        .iter()
        .flat_map(|row| legend.iter().map(move |key| row.value(&key.label)))
        .max()
        .unwrap_or(0);

    box_top(out, title);
    for row in series {
        let _ = writeln!(out, "│ {}{:<75}{}│", CYAN, row.date, RESET);
        for (index, key) in legend.iter().enumerate() {
            let value = row.value(&key.label);
            let color = ansi_fg(series_rgb(&key.fill_color, index));
            let _ = writeln!(
                out,
                "│   {:18} {} {:>10}             │",
                fit_label(&key.label),
                create_bar(value, max_value, BAR_WIDTH, &color),
                format_number(value),
            );
        }
    }
    box_bottom(out);
}


/// Render the footer with the data range and source.
fn render_footer(out: &mut String, date_range: Option<&str>, source: &str) {
    if let Some(range) = date_range {
        let _ = writeln!(out, "{}Data range: {}{}{}{}", DIM, RESET, CYAN, range, RESET);
    }
    let _ = writeln!(out, "{}Source: {}{}", DIM, source, RESET);
    let _ = writeln!(
        out,
        "{}Tip: browse interactively with {}{}wld tui{}",
        DIM, RESET, CYAN, RESET
    );
}
