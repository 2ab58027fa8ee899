//! Visualization layer for dashboards and charts.

mod charts;
mod color;
mod dashboard;
mod export;
mod tui;

#[allow(unused_imports)]
pub use charts::{build_charts, Chart};
pub use dashboard::{render_dashboard, NO_DATA_MESSAGE};
pub use export::{export_charts_png, export_charts_svg, open_file};
pub use tui::run_tui;
