//! Dashboard state and chart visibility rules.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use tracing::error;

use crate::config::ALL_DEVELOPERS;
use crate::error::LoadError;
use crate::models::{Developer, Roster};


/// Which developer the charts are filtered to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeveloperSelection {
    #[default]
    All,
    Named(String),
}


impl DeveloperSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Label used in selectors ("All Developers" or the name).
    pub fn option_label(&self) -> &str {
        match self {
            Self::All => "All Developers",
            Self::Named(name) => name,
        }
    }
}


impl From<&str> for DeveloperSelection {
    fn from(value: &str) -> Self {
        if value == ALL_DEVELOPERS {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }
}


impl fmt::Display for DeveloperSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_DEVELOPERS),
            Self::Named(name) => f.write_str(name),
        }
    }
}


/// Which kinds of chart the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphType {
    #[default]
    All,
    Bar,
    Line,
}


impl GraphType {
    pub const CHOICES: [GraphType; 3] = [GraphType::All, GraphType::Bar, GraphType::Line];

    /// Label used in selectors.
    pub fn option_label(self) -> &'static str {
        match self {
            Self::All => "All Graphs",
            Self::Bar => "Bar Chart",
            Self::Line => "Line Chart",
        }
    }

    /// Next choice, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Bar,
            Self::Bar => Self::Line,
            Self::Line => Self::All,
        }
    }

    fn includes_bar(self) -> bool {
        matches!(self, Self::All | Self::Bar)
    }

    fn includes_line(self) -> bool {
        matches!(self, Self::All | Self::Line)
    }
}


impl FromStr for GraphType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            other => Err(format!("unknown graph type '{}' (expected all, bar or line)", other)),
        }
    }
}


impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "All",
            Self::Bar => "Bar",
            Self::Line => "Line",
        };
        f.write_str(name)
    }
}


/// A chart the renderer may draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Metric totals, all developers or the selected one.
    SummaryBar,
    /// Selected developer, one line per metric over days.
    DeveloperLine,
    /// Selected developer, grouped bars per day.
    DeveloperBar,
}


impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::SummaryBar => "Activity Totals",
            Self::DeveloperLine => "Daily Activity (Line)",
            Self::DeveloperBar => "Daily Activity (Bar)",
        }
    }
}


/// The two selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub selected_developer: DeveloperSelection,
    pub graph_type: GraphType,
}


impl ViewState {
    pub fn new(selected_developer: DeveloperSelection, graph_type: GraphType) -> Self {
        Self { selected_developer, graph_type }
    }

    pub fn set_developer(&mut self, selection: DeveloperSelection) {
        self.selected_developer = selection;
    }

    pub fn set_graph_type(&mut self, graph_type: GraphType) {
        self.graph_type = graph_type;
    }

    /// Charts to draw, in display order.
    ///
    /// | developer | graph    | charts                           |
    /// |-----------|----------|----------------------------------|
    /// | All       | Bar/All  | summary bar                      |
    /// | All       | Line     | none                             |
    /// | named     | Bar      | summary bar, developer bar       |
    /// | named     | Line     | summary bar, developer line      |
    /// | named     | All      | summary bar, developer line, bar |
    pub fn visible_charts(&self) -> Vec<ChartKind> {
        let named = !self.selected_developer.is_all();
        let mut charts = Vec::new();

        if named || self.graph_type.includes_bar() {
            charts.push(ChartKind::SummaryBar);
        }
        if named && self.graph_type.includes_line() {
            charts.push(ChartKind::DeveloperLine);
        }
        if named && self.graph_type.includes_bar() {
            charts.push(ChartKind::DeveloperBar);
        }

        charts
    }
}


/// Coarse load state of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DashboardState {
    #[default]
    Loading,
    Empty,
    Ready(Roster),
}


impl DashboardState {
    /// Settle the state from the loader's single outcome.
    ///
    /// Failures are logged and leave the dashboard empty.
    pub fn resolve(outcome: Result<Roster, LoadError>) -> Self {
        match outcome {
            Ok(roster) if roster.is_empty() => Self::Empty,
            Ok(roster) => Self::Ready(roster),
            Err(e) => {
                error!("Error fetching data: {}", e);
                Self::Empty
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn roster(&self) -> &[Developer] {
        match self {
            Self::Ready(roster) => roster,
            _ => &[],
        }
    }
}


/// Load state plus selectors, owned by whichever front end is running.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub state: DashboardState,
    pub view: ViewState,
}


impl Dashboard {
    pub fn new(view: ViewState) -> Self {
        Self {
            state: DashboardState::Loading,
            view,
        }
    }

    /// Apply the load outcome. Only the first resolution counts.
    pub fn resolve(&mut self, outcome: Result<Roster, LoadError>) {
        if self.state.is_loading() {
            self.state = DashboardState::resolve(outcome);
        }
    }

    /// The selected developer, if one is selected and present.
    pub fn selected_developer(&self) -> Option<&Developer> {
        match &self.view.selected_developer {
            DeveloperSelection::All => None,
            DeveloperSelection::Named(name) => {
                self.state.roster().iter().find(|d| &d.name == name)
            }
        }
    }

    /// Developer selector options: All, then one per roster entry.
    pub fn developer_options(&self) -> Vec<DeveloperSelection> {
        std::iter::once(DeveloperSelection::All)
            .chain(
                self.state
                    .roster()
                    .iter()
                    .map(|d| DeveloperSelection::Named(d.name.clone())),
            )
            .collect()
    }

    /// Move the developer selector by `step` options, wrapping around.
    pub fn cycle_developer(&mut self, step: isize) {
        let options = self.developer_options();
        let len = options.len() as isize;
        let current = options
            .iter()
            .position(|o| *o == self.view.selected_developer)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.view.set_developer(options[next].clone());
    }

    pub fn cycle_graph_type(&mut self) {
        let next = self.view.graph_type.next();
        self.view.set_graph_type(next);
    }
}
