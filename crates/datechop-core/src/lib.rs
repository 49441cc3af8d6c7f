//! # datechop-core
//!
//! Date/time format inference, tolerant parsing and resolution bucketing
//! for timestamped text such as log lines and CSV cells.
//!
//! ## Features
//!
//! - **Format guessing**: A fixed, ordered list of date × time templates is
//!   searched anywhere in a string; the first match wins.
//! - **Tolerant parsing**: Trailing text after a timestamp is dropped once
//!   and the parse retried, so whole log lines can be parsed directly.
//! - **Bucketing**: Timestamps are truncated to any resolution in seconds on
//!   naive epoch seconds, independent of calendar irregularities.
//! - **Shifts**: Optional GMT offsets or IANA zone normalization (via
//!   chrono-tz) with explicit DST policies.
//!
//! ## Example
//!
//! ```rust
//! use datechop_core::prelude::*;
//!
//! let engine = FormatEngine::new().unwrap();
//!
//! // Guess the format of a log line
//! let spec = engine.guess("2010/08/30 13:57:14 Pushing up the daisies").unwrap();
//! assert_eq!(spec.template(), "%Y/%m/%d %H:%M:%S");
//!
//! // Parse and bucket it
//! let ts = spec.parse("2010/08/30 13:57:14 Pushing up the daisies").unwrap();
//! let key = bucket(ts, Resolution::MINUTE).unwrap();
//! println!("Bucket: {}", key);
//! ```

pub mod bucket;
pub mod candidates;
pub mod directive;
pub mod engine;
pub mod error;
pub mod lines;
pub mod models;
pub mod parse;
pub mod zone;

// Re-export commonly used types at the crate root
pub use bucket::{bucket, date_chop};
pub use candidates::CandidateFormats;
pub use engine::FormatEngine;
pub use error::{DateChopError, Result, Unrecognized};
pub use models::{AmbiguousPolicy, NonexistentPolicy, Policy, Resolution, Shift};
pub use parse::{FormatSpec, parse};

/// Prelude module for convenient imports.
///
/// ```
/// use datechop_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bucket::{bucket, date_chop};
    pub use crate::candidates::CandidateFormats;
    pub use crate::engine::FormatEngine;
    pub use crate::error::{DateChopError, Result, Unrecognized};
    pub use crate::models::*;
    pub use crate::parse::{FormatSpec, parse};
    pub use crate::zone::{apply_shift, parse_tz};
}
