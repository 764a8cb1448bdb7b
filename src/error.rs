//! Typed errors for formatting and dataset access.
//!
//! Rendering entry points wrap these in `anyhow::Error`; the pure helpers
//! return them directly so callers can match on the variant.

use thiserror::Error;

/// Failure of a single formatting call. Always a caller-input problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// A formatting parameter is outside its domain (e.g. negative decimals).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The value handed to the formatter is not a finite number.
    #[error("type mismatch: expected a finite number, got {0}")]
    TypeMismatch(String),
    /// The value is too large for the suffix table (`P` is the last entry).
    #[error("value {value} needs magnitude index {magnitude}, past the last suffix \"P\"")]
    OutOfRange { value: f64, magnitude: usize },
}

/// Problems with the shape or content of a [`crate::models::Dataset`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("column '{name}' holds {found} values, expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("column '{name}' has {found} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("no finite values in '{0}'")]
    NoValues(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
