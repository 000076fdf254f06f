//! Error types for argument parsing and validation.

use std::num::ParseIntError;

/// Errors produced while reading or validating task arguments.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("missing required argument: {0}")]
    ArgumentRequired(String),

    #[error("invalid argument: {name}={value}. Permitted values: {permitted:?}")]
    InvalidValue {
        name: String,
        value: String,
        permitted: Vec<String>,
    },

    #[error("unrecognized argument: {arg}")]
    Unrecognized {
        arg: String,
        /// The expected argument the caller probably meant (e.g. the same
        /// name with one more leading `-`).
        suggestion: Option<String>,
    },

    #[error("invalid number for {name}: {value:?}")]
    InvalidNumber {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("argument out of range: {name}={value}. Maximum: {max}")]
    OutOfRange {
        name: String,
        value: String,
        max: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
