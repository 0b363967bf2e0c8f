//! Error types for the RQC workspace

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the RAG console.
///
/// Validation failures are raised before any network call; transport and
/// backend failures carry whatever the backend gave us.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the backend. `message` is the best-effort
    /// extraction (body `message`, then body `error`, then the status reason);
    /// `body` is the full decoded payload.
    #[error("Backend returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: serde_json::Value,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
