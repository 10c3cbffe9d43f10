//! Error types and Result alias for the dip planner

use thiserror::Error;

/// Main error type for the dip planner
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Pair not found: {0}")]
    PairNotFound(String),

    #[error("Cannot remove the last remaining pair")]
    LastPair,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidFormat(err.to_string())
    }
}
