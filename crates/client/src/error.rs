use reqwest::StatusCode;
use thiserror::Error;

/// Errors from calls against the transformation service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("upload failed: {status}")]
    Upload { status: StatusCode },

    #[error("transformation failed: {status}")]
    Transform { status: StatusCode },

    #[error("download failed: {status}")]
    Download { status: StatusCode },

    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Transport(String),

    #[error("failed to parse response JSON: {0}")]
    Json(String),
}

impl ClientError {
    /// Map a reqwest failure, keeping timeouts distinguishable
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
