//! Error types for the docview controller.

use thiserror::Error;

/// Failures reported by a query execution service.
///
/// None of these are fatal to the controller: the previous snapshot stays on
/// display until the next external query change or refresh tick.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Query rejected by service: {0}")]
    Rejected(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed service response: {0}")]
    MalformedResponse(String),
}

/// Crate-level errors for configuration, logging and tooling.
#[derive(Debug, Error)]
pub enum DocviewError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging setup failed: {0}")]
    LoggingError(String),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Fixture error: {0}")]
    FixtureError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for DocviewError {
    fn from(err: config::ConfigError) -> Self {
        DocviewError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for DocviewError {
    fn from(err: serde_json::Error) -> Self {
        DocviewError::FixtureError(err.to_string())
    }
}
