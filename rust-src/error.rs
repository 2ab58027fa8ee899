//! Error types for loading the worklog.

use std::path::PathBuf;

use thiserror::Error;


/// Failure while fetching, reading or validating a worklog payload.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed worklog payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid count {count:?} for '{label}' on {date} ({developer})")]
    InvalidCount {
        developer: String,
        date: String,
        label: String,
        count: String,
    },
}
