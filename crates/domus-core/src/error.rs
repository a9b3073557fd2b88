//! Error types for domus

use thiserror::Error;

/// Main error type for domus.
///
/// Device operations never return this: a refused transition is reported as
/// an [`crate::OpReport`] value. Errors are reserved for the surfaces that
/// can genuinely fail - the decision oracle, configuration, serialization.
#[derive(Error, Debug)]
pub enum DomusError {
    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Invalid command token: {0}")]
    InvalidToken(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for domus operations
pub type Result<T> = std::result::Result<T, DomusError>;
