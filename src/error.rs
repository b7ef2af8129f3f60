//! Error types for the twitlink service.

use thiserror::Error;

/// Errors produced while talking to Twitter or preparing a reply.
#[derive(Error, Debug)]
pub enum TwitterError {
    /// The request never produced a response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// OAuth signature generation failed
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Twitter answered with something that is not the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Convenience alias used throughout the crate.
pub type TwitterResult<T> = Result<T, TwitterError>;
