//! Show command: print the dashboard to the terminal.

use anyhow::Result;

use crate::config::DataSource;
use crate::view::GraphType;
use crate::visualization::{build_charts, render_dashboard, NO_DATA_MESSAGE};

use super::{check_selection, initial_view, load_dashboard};


/// Run the show command.
pub fn run(source: &DataSource, developer: Option<&str>, graph: GraphType, json: bool) -> Result<()> {
    let dashboard = load_dashboard(source, initial_view(developer, graph));
    check_selection(&dashboard)?;

    if json {
        if dashboard.state.roster().is_empty() {
            println!("[]");
            eprintln!("{}", NO_DATA_MESSAGE);
        } else {
            let charts = build_charts(&dashboard);
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }
        return Ok(());
    }

    print!("{}", render_dashboard(&dashboard, &source.describe()));
    Ok(())
}
