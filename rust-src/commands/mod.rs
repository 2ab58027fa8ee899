//! CLI command implementations.

pub mod developers;
pub mod export;
pub mod show;
pub mod tui;

use anyhow::{bail, Result};

use crate::config::DataSource;
use crate::data::load;
use crate::view::{Dashboard, DeveloperSelection, GraphType, ViewState};


/// Load the worklog synchronously and settle the dashboard state.
pub(crate) fn load_dashboard(source: &DataSource, view: ViewState) -> Dashboard {
    let mut dashboard = Dashboard::new(view);
    dashboard.resolve(load(source));
    dashboard
}


/// Build the initial view from the command-line selectors.
pub(crate) fn initial_view(developer: Option<&str>, graph: GraphType) -> ViewState {
    let selection = developer.map(DeveloperSelection::from).unwrap_or_default();
    ViewState::new(selection, graph)
}


/// Reject a `--developer` that is not in the loaded roster.
pub(crate) fn check_selection(dashboard: &Dashboard) -> Result<()> {
    let roster = dashboard.state.roster();
    if roster.is_empty() || dashboard.view.selected_developer.is_all() {
        return Ok(());
    }

    if dashboard.selected_developer().is_none() {
        let names: Vec<&str> = roster.iter().map(|d| d.name.as_str()).collect();
        bail!(
            "Unknown developer '{}'. Available: {}",
            dashboard.view.selected_developer,
            names.join(", ")
        );
    }

    Ok(())
}
