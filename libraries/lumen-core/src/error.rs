/// Error types for play-history store interactions
use thiserror::Error;

/// Result type alias using `HistoryError`
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors raised by a play-history store implementation
///
/// Selection paths treat every variant uniformly as "store unavailable" and
/// degrade to uniform-random picking; explicit-intent operations (record,
/// reset, clear) surface the error to the caller.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Store unreachable, timed out, or the connection dropped
    #[error("History store unreachable: {0}")]
    Transport(String),

    /// Store returned an error response
    #[error("History store error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response did not match the wire contract
    #[error("History contract mismatch: {0}")]
    Contract(String),

    /// Client was configured with an unusable store URL
    #[error("Invalid history store URL: {0}")]
    InvalidUrl(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl HistoryError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a contract-mismatch error
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Create a server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status() {
        let err = HistoryError::server(503, "maintenance");
        assert_eq!(err.to_string(), "History store error (503): maintenance");
    }

    #[test]
    fn helpers_build_expected_variants() {
        assert!(matches!(
            HistoryError::transport("down"),
            HistoryError::Transport(_)
        ));
        assert!(matches!(
            HistoryError::contract("bad payload"),
            HistoryError::Contract(_)
        ));
    }
}
