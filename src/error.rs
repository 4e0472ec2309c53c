//! Cardfeed error types

use thiserror::Error;

/// Cardfeed error type
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or HTTP failure
    #[error("Network error: {0}")]
    Network(String),

    /// Well-formed request for a resource that does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

/// Result type alias for cardfeed operations
pub type Result<T> = std::result::Result<T, Error>;
