//! Application settings and path constants.

use std::path::PathBuf;
use std::time::Duration;


/// Endpoint serving the `AuthorWorklog` payload.
pub const DEFAULT_DATA_URL: &str = "https://dec-backend-2.onrender.com/data";

/// Request timeout for the worklog fetch (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sentinel developer selection meaning "every developer".
pub const ALL_DEVELOPERS: &str = "All";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";


/// Where the worklog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// One GET against a remote endpoint.
    Remote { url: String, timeout: Duration },
    /// A local JSON file with the same payload shape.
    File(PathBuf),
}


impl DataSource {
    /// Remote source with the default timeout.
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Human-readable origin for footers and log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { url, .. } => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}


impl Default for DataSource {
    fn default() -> Self {
        Self::remote(DEFAULT_DATA_URL)
    }
}


/// Get the application directory (`~/.worklog-dash`).
pub fn get_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".worklog-dash")
}


/// Get the default chart export path for the given extension.
pub fn get_default_export_path(extension: &str) -> PathBuf {
    get_app_dir().join(format!("weekly-activity.{}", extension))
}


/// Get the log file used by the interactive dashboard.
pub fn get_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_app_dir)
        .join("worklog-dash")
        .join("tui.log")
}
