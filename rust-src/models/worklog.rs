//! Worklog models as served by the activity endpoint.

use serde::{Deserialize, Serialize};


/// Ordered list of developers, as received from the server.
pub type Roster = Vec<Developer>;


/// A single metric count for one developer on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricItem {
    /// Numeric text, e.g. `"5"`.
    pub count: String,
    pub label: String,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
}


impl MetricItem {
    /// Parse the textual count as a base-10 integer.
    pub fn parse_count(&self) -> Result<i64, std::num::ParseIntError> {
        self.count.trim().parse::<i64>()
    }

    /// Integer value of the count (0 if the text is not a number).
    ///
    /// Rosters coming out of the loader are validated, so the fallback
    /// only applies to hand-built data.
    pub fn value(&self) -> i64 {
        self.parse_count().unwrap_or(0)
    }
}


/// Wrapper object around a day's metric list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayItems {
    #[serde(default)]
    pub children: Vec<MetricItem>,
}


/// One calendar day of activity for one developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: String,
    #[serde(default)]
    pub items: DayItems,
}


impl DayActivity {
    /// Metric items recorded for this day.
    pub fn metrics(&self) -> &[MetricItem] {
        &self.items.children
    }
}


/// A developer and their day-by-day activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    pub name: String,
    #[serde(rename = "dayWiseActivity", default)]
    pub day_wise_activity: Vec<DayActivity>,
}


impl Developer {
    /// Iterate over every metric item across all days.
    pub fn metric_items(&self) -> impl Iterator<Item = &MetricItem> {
        self.day_wise_activity.iter().flat_map(|day| day.metrics())
    }
}


/// The `AuthorWorklog` section of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorWorklog {
    #[serde(default)]
    pub rows: Vec<Developer>,
}


/// Top-level response body: `{ "AuthorWorklog": { "rows": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklogPayload {
    #[serde(rename = "AuthorWorklog")]
    pub author_worklog: AuthorWorklog,
}


impl WorklogPayload {
    /// Take the developer rows out of the payload.
    pub fn into_roster(self) -> Roster {
        self.author_worklog.rows
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, count: &str) -> MetricItem {
        MetricItem {
            count: count.to_string(),
            label: label.to_string(),
            fill_color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_metric_value() {
        assert_eq!(item("Commits", "5").value(), 5);
        assert_eq!(item("Commits", " 12 ").value(), 12);
        assert!(item("Commits", "five").parse_count().is_err());
        assert_eq!(item("Commits", "five").value(), 0);
    }

    #[test]
    fn test_deserialize_payload() {
        let json = r##"{
            "AuthorWorklog": {
                "activityMeta": [],
                "rows": [
                    {
                        "name": "alice@example.com",
                        "totalActivity": [],
                        "dayWiseActivity": [
                            {
                                "date": "2024-05-06",
                                "items": {
                                    "children": [
                                        {"count": "3", "label": "Commits", "fillColor": "#FAC76E"}
                                    ]
                                }
                            }
                        ]
                    }
                ]
            }
        }"##;

        let payload: WorklogPayload = serde_json::from_str(json).unwrap();
        let roster = payload.into_roster();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "alice@example.com");
        let day = &roster[0].day_wise_activity[0];
        assert_eq!(day.date, "2024-05-06");
        assert_eq!(day.metrics()[0].fill_color, "#FAC76E");
    }

    #[test]
    fn test_metric_items_spans_days() {
        let dev = Developer {
            name: "bob".to_string(),
            day_wise_activity: vec![
                DayActivity {
                    date: "2024-01-01".to_string(),
                    items: DayItems { children: vec![item("Commits", "1")] },
                },
                DayActivity {
                    date: "2024-01-02".to_string(),
                    items: DayItems { children: vec![item("Commits", "2"), item("PR Open", "1")] },
                },
            ],
        };

        assert_eq!(dev.metric_items().count(), 3);
    }
}
