//! Export of the visible charts as SVG or PNG.

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregation::{SeriesKey, SeriesRow, SummaryRow};
use crate::view::ViewState;

use super::charts::Chart;
use super::color::{css_color, parse_hex_color, series_rgb, SUMMARY_FILL};


// Light chart theme
const BG: &str = "#FFFFFF";
const TEXT: &str = "#333333";
const TEXT_SECONDARY: &str = "#666666";
const GRID: &str = "#CCCCCC";
const AXIS: &str = "#999999";

// Layout
const WIDTH: i32 = 960;
const HEADER_HEIGHT: i32 = 70;
const PANEL_HEIGHT: i32 = 380;
const PLOT_LEFT: i32 = 70;
const PLOT_RIGHT: i32 = 30;
const PLOT_TOP: i32 = 40;
const PLOT_BOTTOM: i32 = 80;
const GRID_LINES: i32 = 4;


/// Export the charts as an SVG file.
pub fn export_charts_svg(charts: &[Chart], view: &ViewState, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(charts, view);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export the charts as a PNG file.
pub fn export_charts_png(charts: &[Chart], view: &ViewState, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(charts, view);
    let pixmap = rasterize(&svg_content)?;

    pixmap.save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


/// Render an SVG document onto a white pixmap.
///
/// System fonts are loaded so titles, axis labels and legends survive
/// rasterization.
fn rasterize(svg_content: &str) -> Result<tiny_skia::Pixmap> {
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    // Parse SVG
    let tree = resvg::usvg::Tree::from_str(svg_content, &options)
        .context("Failed to parse SVG")?;

    // Render to pixmap
    let size = tree.size();
    let width = size.width() as u32;
    let height = size.height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .context("Failed to create pixmap")?;

    let bg = parse_hex_color(BG).unwrap_or((255, 255, 255));
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap)
}


/// Generate the SVG document: a header followed by one panel per chart.
pub fn generate_svg(charts: &[Chart], view: &ViewState) -> String {
    let panels = charts.len().max(1) as i32;
    let height = HEADER_HEIGHT + panels * PANEL_HEIGHT;

    let mut svg_parts = vec![
        format!(r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#, WIDTH, height),
        "<style>".to_string(),
        format!("  .title {{ fill: {}; font: bold 20px sans-serif; }}", TEXT),
        format!("  .subtitle {{ fill: {}; font: 13px sans-serif; }}", TEXT_SECONDARY),
        format!("  .chart-title {{ fill: {}; font: bold 15px sans-serif; }}", TEXT),
        format!("  .axis-label {{ fill: {}; font: 11px sans-serif; }}", TEXT_SECONDARY),
        format!("  .legend-text {{ fill: {}; font: 12px sans-serif; }}", TEXT),
        format!("  .grid {{ stroke: {}; stroke-width: 1; stroke-dasharray: 3 3; }}", GRID),
        format!("  .axis {{ stroke: {}; stroke-width: 1; }}", AXIS),
        "</style>".to_string(),
        format!(r#"<rect width="{}" height="{}" fill="{}"/>"#, WIDTH, height, BG),
        r#"<text x="20" y="32" class="title">Weekly Developer Activity</text>"#.to_string(),
        format!(
            r#"<text x="20" y="54" class="subtitle">Developer: {} | Graph Type: {}</text>"#,
            escape_xml(view.selected_developer.option_label()),
            view.graph_type.option_label()
        ),
    ];

    if charts.is_empty() {
        svg_parts.push(format!(
            r#"<text x="{}" y="{}" class="subtitle" text-anchor="middle">No chart to show for this selection</text>"#,
            WIDTH / 2,
            HEADER_HEIGHT + PANEL_HEIGHT / 2
        ));
    }

    for (index, chart) in charts.iter().enumerate() {
        let top = HEADER_HEIGHT + index as i32 * PANEL_HEIGHT;
        svg_parts.push(format!(
            r#"<text x="20" y="{}" class="chart-title">{}</text>"#,
            top + 24,
            escape_xml(&chart.title())
        ));

        match chart {
            Chart::Summary { rows, .. } => summary_panel(&mut svg_parts, top, rows),
            Chart::DeveloperLine { legend, series, .. } => line_panel(&mut svg_parts, top, legend, series),
            Chart::DeveloperBar { legend, series, .. } => grouped_bar_panel(&mut svg_parts, top, legend, series),
        }
    }

    svg_parts.push("</svg>".to_string());
    svg_parts.join("\n")
}


/// Plot rectangle of a panel: (left, top, right, bottom).
fn plot_area(top: i32) -> (i32, i32, i32, i32) {
    (
        PLOT_LEFT,
        top + PLOT_TOP,
        WIDTH - PLOT_RIGHT,
        top + PANEL_HEIGHT - PLOT_BOTTOM,
    )
}


/// Round an axis maximum up to 1, 2 or 5 times a power of ten.
fn nice_max(max_value: i64) -> i64 {
    if max_value <= 0 {
        return GRID_LINES as i64;
    }

    let mut magnitude = 1i64;
    while let Some(next) = magnitude.checked_mul(10).filter(|next| *next <= max_value) {
        magnitude = next;
    }

    [1i64, 2, 5, 10]
        .iter()
        .filter_map(|step| step.checked_mul(magnitude))
        .find(|candidate| *candidate >= max_value)
        .unwrap_or(max_value)
}


/// Dashed horizontal grid, y-axis labels and the x-axis line.
fn grid_and_axes(parts: &mut Vec<String>, top: i32, axis_max: i64) {
    let (left, plot_top, right, bottom) = plot_area(top);
    let plot_height = bottom - plot_top;

    for i in 0..=GRID_LINES {
        let y = bottom - plot_height * i / GRID_LINES;
        let value = (axis_max as i128 * i as i128 / GRID_LINES as i128) as i64;
        parts.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="grid"/>"#,
            left, y, right, y
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="axis-label" text-anchor="end">{}</text>"#,
            left - 8, y + 4, value
        ));
    }

    parts.push(format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="axis"/>"#,
        left, bottom, right, bottom
    ));
    parts.push(format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="axis"/>"#,
        left, plot_top, left, bottom
    ));
}


fn scale_y(value: i64, axis_max: i64, plot_top: i32, bottom: i32) -> i32 {
    let ratio = value.max(0) as f64 / axis_max.max(1) as f64;
    bottom - ((bottom - plot_top) as f64 * ratio) as i32
}


fn x_label(parts: &mut Vec<String>, x: i32, bottom: i32, text: &str) {
    parts.push(format!(
        r#"<text x="{}" y="{}" class="axis-label" text-anchor="middle">{}</text>"#,
        x, bottom + 18, escape_xml(text)
    ));
}


/// Metric totals as a single bar series.
fn summary_panel(parts: &mut Vec<String>, top: i32, rows: &[SummaryRow]) {
    let axis_max = nice_max(rows.iter().map(|r| r.value).max().unwrap_or(0));
    grid_and_axes(parts, top, axis_max);

    let (left, plot_top, right, bottom) = plot_area(top);
    let band = (right - left) / rows.len().max(1) as i32;
    let bar_width = band * 3 / 5;
    let fill = parse_hex_color(SUMMARY_FILL).map(css_color).unwrap_or_else(|| SUMMARY_FILL.to_string());

    for (i, row) in rows.iter().enumerate() {
        let center = left + band * i as i32 + band / 2;
        let y = scale_y(row.value, axis_max, plot_top, bottom);
        parts.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}: {}</title></rect>"#,
            center - bar_width / 2, y, bar_width, bottom - y, fill, escape_xml(&row.name), row.value
        ));
        x_label(parts, center, bottom, &row.name);
    }

    legend_row(parts, top, &[("value".to_string(), fill)]);
}


/// One polyline per metric over the developer's days.
fn line_panel(parts: &mut Vec<String>, top: i32, legend: &[SeriesKey], series: &[SeriesRow]) {
    let axis_max = nice_max(series_max(legend, series));
    grid_and_axes(parts, top, axis_max);

    let (left, plot_top, right, bottom) = plot_area(top);
    let x_at = |i: usize| -> i32 {
        if series.len() <= 1 {
            (left + right) / 2
        } else {
            left + (right - left) * i as i32 / (series.len() as i32 - 1)
        }
    };

    for (i, row) in series.iter().enumerate() {
        x_label(parts, x_at(i), bottom, &row.date);
    }

    let mut entries = Vec::new();
    for (index, key) in legend.iter().enumerate() {
        let color = css_color(series_rgb(&key.fill_color, index));
        let points: Vec<String> = series
            .iter()
            .enumerate()
            .map(|(i, row)| format!("{},{}", x_at(i), scale_y(row.value(&key.label), axis_max, plot_top, bottom)))
            .collect();

        parts.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            points.join(" "), color
        ));
        for point in &points {
            if let Some((x, y)) = point.split_once(',') {
                parts.push(format!(
                    r#"<circle cx="{}" cy="{}" r="3" fill="{}" stroke="{}"/>"#,
                    x, y, BG, color
                ));
            }
        }
        entries.push((key.label.clone(), color));
    }

    legend_row(parts, top, &entries);
}


/// Grouped bars: one group per day, one bar per metric.
fn grouped_bar_panel(parts: &mut Vec<String>, top: i32, legend: &[SeriesKey], series: &[SeriesRow]) {
    let axis_max = nice_max(series_max(legend, series));
    grid_and_axes(parts, top, axis_max);

    let (left, plot_top, right, bottom) = plot_area(top);
    let band = (right - left) / series.len().max(1) as i32;
    let group_width = band * 4 / 5;
    let bar_width = (group_width / legend.len().max(1) as i32).max(1);

    let colors: Vec<String> = legend
        .iter()
        .enumerate()
        .map(|(index, key)| css_color(series_rgb(&key.fill_color, index)))
        .collect();

    for (i, row) in series.iter().enumerate() {
        let group_left = left + band * i as i32 + (band - group_width) / 2;
        for (k, key) in legend.iter().enumerate() {
            let value = row.value(&key.label);
            let y = scale_y(value, axis_max, plot_top, bottom);
            parts.push(format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{} {}: {}</title></rect>"#,
                group_left + bar_width * k as i32, y, bar_width, bottom - y, colors[k],
                escape_xml(&row.date), escape_xml(&key.label), value
            ));
        }
        x_label(parts, left + band * i as i32 + band / 2, bottom, &row.date);
    }

    let entries: Vec<(String, String)> = legend
        .iter()
        .zip(colors)
        .map(|(key, color)| (key.label.clone(), color))
        .collect();
    legend_row(parts, top, &entries);
}


fn series_max(legend: &[SeriesKey], series: &[SeriesRow]) -> i64 {
    series
        .iter()
        .flat_map(|row| legend.iter().map(move |key| row.value(&key.label)))
        .max()
        .unwrap_or(0)
}


/// Legend swatches below the plot.
fn legend_row(parts: &mut Vec<String>, top: i32, entries: &[(String, String)]) {
    let y = top + PANEL_HEIGHT - 30;
    let mut x = PLOT_LEFT;

    for (label, color) in entries {
        parts.push(format!(
            r#"<rect x="{}" y="{}" width="12" height="12" fill="{}"/>"#,
            x, y - 10, color
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="legend-text">{}</text>"#,
            x + 18, y, escape_xml(label)
        ));
        x += 30 + label.chars().count() as i32 * 7;
    }
}


fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}
