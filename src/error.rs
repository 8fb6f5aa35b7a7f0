//! Error types for the cloud_mirror crate.

use thiserror::Error;

/// Errors that can occur while resolving or mirroring a share link.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("No embedded config found in page: {0}")]
    ConfigNotFound(String),

    #[error("Failed to parse embedded config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Embedded config is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unrecognized node kind: {0}")]
    UnknownNodeKind(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed ({status}): {url}")]
    DownloadFailed { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ShareError.
pub type Result<T> = std::result::Result<T, ShareError>;
