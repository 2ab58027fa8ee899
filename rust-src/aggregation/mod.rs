//! Aggregation layer for worklog metrics.

mod metrics;

#[allow(unused_imports)]
pub use metrics::{
    build_summary_rows,
    build_time_series,
    developer_total,
    series_legend,
    total_for_metric,
    SeriesKey,
    SeriesRow,
    SummaryRow,
    METRIC_LABELS,
};
