//! Binds aggregator output to the charts the view asks for.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregation::{
    build_summary_rows,
    build_time_series,
    series_legend,
    SeriesKey,
    SeriesRow,
    SummaryRow,
};
use crate::models::Developer;
use crate::view::{ChartKind, Dashboard};


/// Chart-ready data for one visible chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum Chart {
    Summary {
        subject: String,
        rows: Vec<SummaryRow>,
    },
    DeveloperLine {
        developer: String,
        legend: Vec<SeriesKey>,
        series: Vec<SeriesRow>,
    },
    DeveloperBar {
        developer: String,
        legend: Vec<SeriesKey>,
        series: Vec<SeriesRow>,
    },
}


impl Chart {
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Summary { .. } => ChartKind::SummaryBar,
            Self::DeveloperLine { .. } => ChartKind::DeveloperLine,
            Self::DeveloperBar { .. } => ChartKind::DeveloperBar,
        }
    }

    /// Title including who the chart is about.
    pub fn title(&self) -> String {
        match self {
            Self::Summary { subject, .. } => format!("{} ({})", self.kind().title(), subject),
            Self::DeveloperLine { developer, .. } | Self::DeveloperBar { developer, .. } => {
                format!("{} - {}", self.kind().title(), developer)
            }
        }
    }
}


/// Build data for every chart the current view shows.
///
/// Returns nothing unless the dashboard is ready.
pub fn build_charts(dashboard: &Dashboard) -> Vec<Chart> {
    let roster = dashboard.state.roster();
    if roster.is_empty() {
        return Vec::new();
    }

    let selection = &dashboard.view.selected_developer;
    let developer = dashboard.selected_developer();

    dashboard
        .view
        .visible_charts()
        .into_iter()
        .filter_map(|kind| match kind {
            ChartKind::SummaryBar => Some(Chart::Summary {
                subject: selection.option_label().to_string(),
                rows: build_summary_rows(roster, selection),
            }),
            ChartKind::DeveloperLine => developer.map(|dev| Chart::DeveloperLine {
                developer: dev.name.clone(),
                legend: series_legend(dev),
                series: build_time_series(dev),
            }),
            ChartKind::DeveloperBar => developer.map(|dev| Chart::DeveloperBar {
                developer: dev.name.clone(),
                legend: series_legend(dev),
                series: build_time_series(dev),
            }),
        })
        .collect()
}


/// First and last day covered by the roster, e.g. `2024-01-01 to 2024-01-07`.
///
/// Dates that are not `YYYY-MM-DD` are compared as plain text.
pub fn date_range(roster: &[Developer]) -> Option<String> {
    let dates: Vec<&str> = roster
        .iter()
        .flat_map(|d| d.day_wise_activity.iter().map(|day| day.date.as_str()))
        .collect();

    let parsed: Option<Vec<NaiveDate>> = dates
        .iter()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .collect();

    match parsed {
        Some(days) => {
            let first = days.iter().min()?;
            let last = days.iter().max()?;
            Some(format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")))
        }
        None => {
            let first = dates.iter().min()?;
            let last = dates.iter().max()?;
            Some(format!("{} to {}", first, last))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayActivity, DayItems, MetricItem};
    use crate::view::{DeveloperSelection, GraphType, ViewState};

    fn roster() -> Vec<Developer> {
        vec![Developer {
            name: "alice".to_string(),
            day_wise_activity: vec![
                DayActivity {
                    date: "2024-01-02".to_string(),
                    items: DayItems {
                        children: vec![MetricItem {
                            count: "5".to_string(),
                            label: "Commits".to_string(),
                            fill_color: "#FAC76E".to_string(),
                        }],
                    },
                },
                DayActivity {
                    date: "2024-01-01".to_string(),
                    items: DayItems::default(),
                },
            ],
        }]
    }

    fn ready(selection: DeveloperSelection, graph: GraphType) -> Dashboard {
        let mut dashboard = Dashboard::new(ViewState::new(selection, graph));
        dashboard.resolve(Ok(roster()));
        dashboard
    }

    #[test]
    fn test_no_charts_while_loading() {
        let dashboard = Dashboard::default();
        assert!(build_charts(&dashboard).is_empty());
    }

    #[test]
    fn test_all_developers_line_is_empty() {
        let dashboard = ready(DeveloperSelection::All, GraphType::Line);
        assert!(build_charts(&dashboard).is_empty());
    }

    #[test]
    fn test_named_all_graphs() {
        let dashboard = ready(DeveloperSelection::Named("alice".to_string()), GraphType::All);
        let charts = build_charts(&dashboard);
        let kinds: Vec<ChartKind> = charts.iter().map(Chart::kind).collect();

        assert_eq!(kinds, vec![ChartKind::SummaryBar, ChartKind::DeveloperLine, ChartKind::DeveloperBar]);
        assert_eq!(charts[0].title(), "Activity Totals (alice)");
        assert_eq!(charts[1].title(), "Daily Activity (Line) - alice");
    }

    #[test]
    fn test_unknown_developer_skips_developer_charts() {
        let dashboard = ready(DeveloperSelection::Named("zed".to_string()), GraphType::All);
        let charts = build_charts(&dashboard);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].kind(), ChartKind::SummaryBar);
    }

    #[test]
    fn test_chart_serializes_tagged() {
        let dashboard = ready(DeveloperSelection::All, GraphType::Bar);
        let json = serde_json::to_value(build_charts(&dashboard)).unwrap();
        assert_eq!(json[0]["chart"], "summary");
        assert_eq!(json[0]["rows"][2]["name"], "Commits");
        assert_eq!(json[0]["rows"][2]["value"], 5);
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(&roster()).as_deref(), Some("2024-01-01 to 2024-01-02"));
        assert_eq!(date_range(&[]), None);
    }
}
