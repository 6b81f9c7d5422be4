//! Failures shared by the quote server and the polling client.
use std::io;

use log::error;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    /// The outgoing request could not be built (bad URL and the like).
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),

    /// Sending the request or reading its body failed.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The deadline guarding the operation elapsed first.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("upstream answered with status {0}")]
    UpstreamStatus(StatusCode),

    /// The body was not the JSON shape we expected.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl QuoteError {
    pub fn is_deadline(&self) -> bool {
        match self {
            QuoteError::DeadlineExceeded => true,
            QuoteError::Transport(err) => err.is_timeout(),
            QuoteError::Persistence(sqlx::Error::PoolTimedOut) => true,
            _ => false,
        }
    }
}

pub type Result<T, E = QuoteError> = std::result::Result<T, E>;

/// Logs a failed operation, naming the deadline instead of the error when it
/// was the deadline that stopped it.
pub fn log_error(operation: &str, err: &QuoteError) {
    if err.is_deadline() {
        error!("operation: {}, error: deadline exceeded", operation);
    } else {
        error!("operation: {}, error: {}", operation, err);
    }
}
