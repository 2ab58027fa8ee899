//! Developers command: list the developer selector options.

use anyhow::Result;

use crate::config::DataSource;
use crate::view::{DeveloperSelection, ViewState};
use crate::visualization::NO_DATA_MESSAGE;

use super::load_dashboard;


// Constants
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";


/// Run the developers command.
pub fn run(source: &DataSource) -> Result<()> {
    let dashboard = load_dashboard(source, ViewState::default());
    let roster = dashboard.state.roster();

    if roster.is_empty() {
        println!("{}", NO_DATA_MESSAGE);
        return Ok(());
    }

    println!("{} ({})", DeveloperSelection::All.option_label(), DeveloperSelection::All);
    for developer in roster {
        println!(
            "  {}{}{} {}({} days){}",
            CYAN,
            developer.name,
            RESET,
            DIM,
            developer.day_wise_activity.len(),
            RESET,
        );
    }

    Ok(())
}
