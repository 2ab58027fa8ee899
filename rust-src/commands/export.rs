//! Export command for chart images.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{get_default_export_path, DataSource};
use crate::view::GraphType;
use crate::visualization::{build_charts, export_charts_png, export_charts_svg, open_file, NO_DATA_MESSAGE};

use super::{check_selection, initial_view, load_dashboard};


/// Run the export command.
pub fn run(
    source: &DataSource,
    developer: Option<&str>,
    graph: GraphType,
    svg: bool,
    should_open: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let format_type = if svg { "svg" } else { "png" };
    let output_path = output.unwrap_or_else(|| get_default_export_path(format_type));

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let dashboard = load_dashboard(source, initial_view(developer, graph));
    if dashboard.state.roster().is_empty() {
        println!("{}", NO_DATA_MESSAGE);
        return Ok(());
    }
    check_selection(&dashboard)?;

    let charts = build_charts(&dashboard);
    println!("Exporting {} chart(s) to {}...", charts.len(), format_type.to_uppercase());

    if svg {
        export_charts_svg(&charts, &dashboard.view, &output_path)?;
    } else {
        export_charts_png(&charts, &dashboard.view, &output_path)?;
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    if should_open {
        println!("Opening {}...", format_type.to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}
