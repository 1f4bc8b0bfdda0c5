//! Error types for Parley

use thiserror::Error;

/// Main error type for Parley operations
#[derive(Error, Debug)]
pub enum ParleyError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup/runtime errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Parley operations
pub type Result<T> = std::result::Result<T, ParleyError>;
