//! Core error types for the navlens reporting engine.
//!
//! This module defines storage-agnostic error types. Collaborator-specific
//! failures (SQL drivers, HTTP benchmark feeds, etc.) are converted to these
//! types at the trait boundary.
//!
//! Data-quality conditions (missing lookback history, implausible returns,
//! malformed source rows, empty series) are deliberately NOT represented
//! here: the engine degrades those to `None`/zero/empty fields with a
//! diagnostic log line and keeps going. `Error` covers collaborator failures
//! and caller mistakes only.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the reporting engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Benchmark provider error: {0}")]
    Provider(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors for caller input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
