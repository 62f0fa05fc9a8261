//! Error types for clawdash-core

use thiserror::Error;

/// Main error type for the clawdash-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Network-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Request(String),

    /// The gateway answered with a non-2xx status
    #[error("{status} {reason}")]
    Api { status: u16, reason: String },

    /// A push-channel event carried a payload that does not match its name
    #[error("malformed `{event}` event: {message}")]
    Decode { event: String, message: String },

    /// Logging setup error
    #[error("logging error: {0}")]
    Logging(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            },
            None => Error::Request(err.to_string()),
        }
    }
}

/// Result type alias for clawdash-core
pub type Result<T> = std::result::Result<T, Error>;
