//! Data models for the developer worklog payload.

mod worklog;

#[allow(unused_imports)]
pub use worklog::{
    AuthorWorklog,
    DayActivity,
    DayItems,
    Developer,
    MetricItem,
    Roster,
    WorklogPayload,
};
