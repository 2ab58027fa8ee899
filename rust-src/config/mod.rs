//! Configuration and settings for worklog-dash.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    get_app_dir,
    get_default_export_path,
    get_log_path,
    DataSource,
    ALL_DEVELOPERS,
    DEFAULT_DATA_URL,
    DEFAULT_TIMEOUT_SECS,
    DEFAULT_LOG_DIRECTIVE,
};
