//! Error types for datechop-core.
//!
//! Two failures are expected during normal operation and are meant to be
//! recovered by callers: [`DateChopError::DateParseFailure`] (text does not
//! conform to a given template) and [`DateChopError::DateFormatUnknown`]
//! (no candidate template recognizes the text). The remaining variants are
//! contract violations or environment failures.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for datechop operations.
#[derive(Debug, Error)]
pub enum DateChopError {
    /// Text does not match the given template, even after dropping
    /// unconverted trailing data once.
    #[error("Cannot parse '{text}' with format '{template}': {reason}")]
    DateParseFailure {
        text: String,
        template: String,
        reason: String,
    },

    /// No candidate format matches a string, or any line of a file.
    #[error("{0}")]
    DateFormatUnknown(Unrecognized),

    /// A template uses a directive outside the supported vocabulary.
    #[error("Invalid format template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// Bucketing resolution must be a positive number of seconds.
    #[error("Invalid resolution: {0} (expected a positive number of seconds)")]
    InvalidResolution(i64),

    /// Invalid timezone name provided.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// DST policy violation (nonexistent or ambiguous time with error policy).
    #[error("Policy error: {0}")]
    PolicyError(String),

    /// Arithmetic left the representable timestamp range.
    #[error("Timestamp out of range: {0}")]
    OutOfRange(String),

    /// Failure reading an input file.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What format guessing was run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unrecognized {
    /// A single string.
    Text(String),
    /// Every line of a file.
    File(PathBuf),
}

impl std::fmt::Display for Unrecognized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unrecognized::Text(text) => write!(f, "Could not guess date/time format in: {}", text),
            Unrecognized::File(path) => {
                write!(f, "No date/time strings found in '{}'", path.display())
            }
        }
    }
}

/// Result type alias for datechop operations.
pub type Result<T> = std::result::Result<T, DateChopError>;
