//! Error types for the play-history client.

use lumen_core::HistoryError;
use thiserror::Error;

/// Errors that can occur when talking to the play-history service.
#[derive(Error, Debug)]
pub enum HistoryClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("History service error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Service is offline or unreachable
    #[error("History service unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid service URL
    #[error("Invalid history service URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for play-history client operations.
pub type Result<T> = std::result::Result<T, HistoryClientError>;

// The store contract speaks `HistoryError`; adapter-local failures map onto
// its taxonomy losslessly: anything network-shaped is Transport, malformed
// payloads are Contract.
impl From<HistoryClientError> for HistoryError {
    fn from(err: HistoryClientError) -> Self {
        match err {
            HistoryClientError::Request(e) => HistoryError::Transport(e.to_string()),
            HistoryClientError::ServerUnreachable(msg) => HistoryError::Transport(msg),
            HistoryClientError::ServerError { status, message } => {
                HistoryError::Server { status, message }
            }
            HistoryClientError::ParseError(msg) => HistoryError::Contract(msg),
            HistoryClientError::InvalidUrl(msg) => HistoryError::InvalidUrl(msg),
        }
    }
}
