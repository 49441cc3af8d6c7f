//! Error types for datechop-scan.

use datechop_core::DateChopError;
use thiserror::Error;

/// The main error type for scan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Format guessing, parsing or bucketing failed in a way the scanner
    /// does not absorb.
    #[error(transparent)]
    Core(#[from] DateChopError),

    /// A match predicate could not be compiled as a pattern.
    #[error("Invalid predicate '{predicate}': {source}")]
    InvalidPredicate {
        predicate: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
