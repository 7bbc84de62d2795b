//! Error types for the scenario harness.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mock error: {0}")]
    Mock(#[from] pizzamock::MockError),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
