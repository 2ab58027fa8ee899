//! Tui command: interactive dashboard.

use anyhow::Result;

use crate::config::DataSource;
use crate::data::spawn_load;
use crate::view::{Dashboard, GraphType};
use crate::visualization::run_tui;

use super::initial_view;


/// Run the interactive dashboard.
///
/// The fetch runs in the background so the "Loading..." screen shows
/// immediately.
pub fn run(source: &DataSource, developer: Option<&str>, graph: GraphType) -> Result<()> {
    let pending = spawn_load(source.clone());
    let dashboard = Dashboard::new(initial_view(developer, graph));

    run_tui(dashboard, pending, &source.describe())
}
