//! Error types for ragview.
//!
//! One enum covers both the user-facing failures of a query round trip
//! (`EmptyQuery`, `RequestFailed`) and the ambient failures of the binary
//! (configuration, terminal setup, I/O).

use thiserror::Error;

/// Unified error type for ragview.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic; errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Submit was invoked with a blank or whitespace-only query
    #[error("Empty query")]
    EmptyQuery,

    /// The round trip to the query service failed (connection, status, body)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error is one the query view recovers from by itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::EmptyQuery | AppError::RequestFailed(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
