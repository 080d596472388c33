//! Error types for the sifter crate.

use thiserror::Error;

/// Errors raised while building specifications or running queries.
#[derive(Debug, Error)]
pub enum SifterError {
    /// A required argument (usually the specification) was not supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Operator cannot be applied to the comparison value's type.
    #[error("operator '{op}' is not valid for {value_type} values")]
    InvalidOperator {
        op: &'static str,
        value_type: &'static str,
    },
}

/// Result type for sifter operations.
pub type Result<T> = std::result::Result<T, SifterError>;
