//! Metric totals and per-day series for charting.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Developer;
use crate::view::DeveloperSelection;


/// Metrics shown on the summary chart, in display order.
pub const METRIC_LABELS: [&str; 7] = [
    "PR Open",
    "PR Merged",
    "Commits",
    "PR Reviewed",
    "PR Comments",
    "Incident Alerts",
    "Incidents Resolved",
];


/// One bar of the summary chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub value: i64,
}


/// One day of a developer's series: the date plus label -> count text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesRow {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}


impl SeriesRow {
    /// Numeric value for a label on this day (0 when absent).
    pub fn value(&self, label: &str) -> i64 {
        self.values
            .get(label)
            .and_then(|count| count.trim().parse().ok())
            .unwrap_or(0)
    }
}


/// A series in a developer's time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesKey {
    pub label: String,
    pub fill_color: String,
}


/// Sum one metric across every developer and every day.
///
/// Totals saturate at the `i64` bounds instead of overflowing.
pub fn total_for_metric(roster: &[Developer], label: &str) -> i64 {
    roster
        .iter()
        .map(|developer| developer_total(developer, label))
        .fold(0, i64::saturating_add)
}


/// Sum one metric across every day of a single developer.
pub fn developer_total(developer: &Developer, label: &str) -> i64 {
    developer
        .metric_items()
        .filter(|item| item.label == label)
        .map(|item| item.value())
        .fold(0, i64::saturating_add)
}


/// Build the summary chart rows for the current selection.
///
/// A named selection only ever counts that developer. If nobody in the
/// roster has that name every row is zero.
pub fn build_summary_rows(roster: &[Developer], selection: &DeveloperSelection) -> Vec<SummaryRow> {
    let selected = match selection {
        DeveloperSelection::All => None,
        DeveloperSelection::Named(name) => Some(roster.iter().find(|d| &d.name == name)),
    };

    METRIC_LABELS
        .iter()
        .map(|label| {
            let value = match selected {
                None => total_for_metric(roster, label),
                Some(Some(developer)) => developer_total(developer, label),
                Some(None) => 0,
            };
            SummaryRow {
                name: label.to_string(),
                value,
            }
        })
        .collect()
}


/// Flatten a developer's days into one row per day.
pub fn build_time_series(developer: &Developer) -> Vec<SeriesRow> {
    developer
        .day_wise_activity
        .iter()
        .map(|day| {
            let mut values = BTreeMap::new();
            for item in day.metrics() {
                values.insert(item.label.clone(), item.count.clone());
            }
            SeriesRow {
                date: day.date.clone(),
                values,
            }
        })
        .collect()
}


/// Legend for a developer's time chart.
///
/// Labels are collected across all days in first-seen order, so a metric
/// missing from the first day still gets a series.
pub fn series_legend(developer: &Developer) -> Vec<SeriesKey> {
    let mut legend: Vec<SeriesKey> = Vec::new();

    for item in developer.metric_items() {
        if !legend.iter().any(|key| key.label == item.label) {
            legend.push(SeriesKey {
                label: item.label.clone(),
                fill_color: item.fill_color.clone(),
            });
        }
    }

    legend
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayActivity, DayItems, MetricItem};

    fn item(label: &str, count: &str, color: &str) -> MetricItem {
        MetricItem {
            count: count.to_string(),
            label: label.to_string(),
            fill_color: color.to_string(),
        }
    }

    fn day(date: &str, items: Vec<MetricItem>) -> DayActivity {
        DayActivity {
            date: date.to_string(),
            items: DayItems { children: items },
        }
    }

    fn developer(name: &str, days: Vec<DayActivity>) -> Developer {
        Developer {
            name: name.to_string(),
            day_wise_activity: days,
        }
    }

    fn sample_roster() -> Vec<Developer> {
        vec![
            developer("alice", vec![
                day("2024-01-01", vec![
                    item("Commits", "5", "#FAC76E"),
                    item("PR Open", "2", "#EF6B6B"),
                ]),
                day("2024-01-02", vec![
                    item("Commits", "3", "#FAC76E"),
                    item("PR Merged", "1", "#61CDBB"),
                ]),
            ]),
            developer("bob", vec![
                day("2024-01-01", vec![
                    item("Commits", "7", "#FAC76E"),
                    item("Incident Alerts", "4", "#C2528B"),
                ]),
            ]),
        ]
    }

    #[test]
    fn test_single_developer_scenario() {
        let roster = vec![developer("Alice", vec![day("2024-01-01", vec![
            item("Commits", "5", "#FAC76E"),
            item("PR Open", "2", "#EF6B6B"),
        ])])];

        assert_eq!(total_for_metric(&roster, "Commits"), 5);

        let rows = build_summary_rows(&roster, &DeveloperSelection::All);
        let values: Vec<(&str, i64)> = rows.iter().map(|r| (r.name.as_str(), r.value)).collect();
        assert_eq!(values, vec![
            ("PR Open", 2),
            ("PR Merged", 0),
            ("Commits", 5),
            ("PR Reviewed", 0),
            ("PR Comments", 0),
            ("Incident Alerts", 0),
            ("Incidents Resolved", 0),
        ]);
    }

    #[test]
    fn test_roster_total_is_sum_of_developer_totals() {
        let roster = sample_roster();
        for label in METRIC_LABELS.iter().chain(["Unknown"].iter()) {
            let per_dev: i64 = roster.iter().map(|d| developer_total(d, label)).sum();
            assert_eq!(total_for_metric(&roster, label), per_dev, "label {}", label);
        }
        assert_eq!(total_for_metric(&roster, "Commits"), 15);
    }

    #[test]
    fn test_summary_all_matches_per_developer_sums() {
        let roster = sample_roster();
        let rows = build_summary_rows(&roster, &DeveloperSelection::All);

        assert_eq!(rows.len(), METRIC_LABELS.len());
        for (row, label) in rows.iter().zip(METRIC_LABELS.iter()) {
            assert_eq!(row.name, *label);
            let expected: i64 = roster.iter().map(|d| developer_total(d, label)).sum();
            assert_eq!(row.value, expected);
        }
    }

    #[test]
    fn test_summary_named_excludes_others() {
        let roster = sample_roster();
        let rows = build_summary_rows(&roster, &DeveloperSelection::Named("bob".to_string()));

        let commits = rows.iter().find(|r| r.name == "Commits").unwrap();
        assert_eq!(commits.value, 7);
        let pr_open = rows.iter().find(|r| r.name == "PR Open").unwrap();
        assert_eq!(pr_open.value, 0);
        let alerts = rows.iter().find(|r| r.name == "Incident Alerts").unwrap();
        assert_eq!(alerts.value, 4);
    }

    #[test]
    fn test_summary_unknown_developer_is_zero() {
        let roster = sample_roster();
        let rows = build_summary_rows(&roster, &DeveloperSelection::Named("carol".to_string()));
        assert!(rows.iter().all(|r| r.value == 0));
    }

    #[test]
    fn test_summary_empty_roster() {
        let rows = build_summary_rows(&[], &DeveloperSelection::All);
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.value == 0));
    }

    #[test]
    fn test_totals_saturate_on_huge_counts() {
        let roster = vec![
            developer("alice", vec![day("2024-01-01", vec![
                item("Commits", "9223372036854775807", "#FAC76E"),
            ])]),
            developer("bob", vec![day("2024-01-01", vec![
                item("Commits", "1", "#FAC76E"),
                item("PR Open", "-9223372036854775808", "#EF6B6B"),
                item("PR Open", "-1", "#EF6B6B"),
            ])]),
        ];

        assert_eq!(total_for_metric(&roster, "Commits"), i64::MAX);
        assert_eq!(developer_total(&roster[1], "PR Open"), i64::MIN);

        let rows = build_summary_rows(&roster, &DeveloperSelection::All);
        assert_eq!(rows[2].value, i64::MAX);
        assert_eq!(rows[0].value, i64::MIN);
    }

    #[test]
    fn test_build_time_series() {
        let roster = sample_roster();
        let series = build_time_series(&roster[0]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[0].values.get("Commits").map(String::as_str), Some("5"));
        assert_eq!(series[0].value("PR Open"), 2);
        assert_eq!(series[0].value("PR Merged"), 0);
        assert_eq!(series[1].value("PR Merged"), 1);
    }

    #[test]
    fn test_time_series_last_duplicate_wins() {
        let dev = developer("dup", vec![day("2024-01-01", vec![
            item("Commits", "1", "#111111"),
            item("Commits", "9", "#111111"),
        ])]);
        let series = build_time_series(&dev);
        assert_eq!(series[0].value("Commits"), 9);
    }

    #[test]
    fn test_series_row_serializes_flat() {
        let roster = sample_roster();
        let series = build_time_series(&roster[1]);
        let json = serde_json::to_value(&series[0]).unwrap();

        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["Commits"], "7");
        assert_eq!(json["Incident Alerts"], "4");
    }

    #[test]
    fn test_series_legend_unions_days() {
        let roster = sample_roster();
        let legend = series_legend(&roster[0]);
        let labels: Vec<&str> = legend.iter().map(|k| k.label.as_str()).collect();

        assert_eq!(labels, vec!["Commits", "PR Open", "PR Merged"]);
        assert_eq!(legend[2].fill_color, "#61CDBB");
    }
}
