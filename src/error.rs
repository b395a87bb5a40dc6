use thiserror::Error;

use crate::model::JobId;

#[derive(Error, Debug)]
pub enum JobBoardError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("No access token available")]
    MissingCredentials,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for JobBoardError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            JobBoardError::Timeout
        } else if e.is_decode() {
            JobBoardError::Decode(e.to_string())
        } else {
            JobBoardError::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, JobBoardError>;
