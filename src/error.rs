//! Error types for jarstore.

use thiserror::Error;

/// Common error type for jarstore.
#[derive(Error, Debug)]
pub enum JarstoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for client input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Archive creation error.
    #[error("archive error: {0}")]
    Archive(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<zip::result::ZipError> for JarstoreError {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => JarstoreError::Io(io),
            other => JarstoreError::Archive(other.to_string()),
        }
    }
}

/// Result type alias for jarstore operations.
pub type Result<T> = std::result::Result<T, JarstoreError>;
