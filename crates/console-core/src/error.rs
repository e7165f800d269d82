use thiserror::Error;

/// Errors produced by calls against the sync daemon's API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Daemon answered with a non-2xx status.
    #[error("daemon returned HTTP {0}")]
    Status(u16),

    /// Transport-level failure (connect, timeout, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
