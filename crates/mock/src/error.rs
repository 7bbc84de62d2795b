//! Error types for the mock service.
//!
//! Handler-level rejections (401 on bad credentials, 404 on an unknown
//! user id) are part of the modeled contract and travel as ordinary
//! [`crate::intercept::MockResponse`] values, not as Rust errors.

use thiserror::Error;

/// Result type alias using [`MockError`]
pub type Result<T> = std::result::Result<T, MockError>;

#[derive(Error, Debug)]
pub enum MockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid route pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
