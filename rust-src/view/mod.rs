//! View state: load status plus the developer and graph type selectors.

mod state;

pub use state::{
    ChartKind,
    Dashboard,
    DashboardState,
    DeveloperSelection,
    GraphType,
    ViewState,
};
