//! # datechop-scan
//!
//! Buckets the lines of timestamped log files into fixed-width intervals
//! and counts, per interval, how many lines match each of a set of
//! predicates.
//!
//! Lines without a timestamp of their own are counted in the bucket of the
//! last timestamped line before them, so multi-line records stay together.
//!
//! ## Example
//!
//! ```no_run
//! use datechop_core::{FormatEngine, Resolution};
//! use datechop_scan::{ScanOptions, Scanner};
//!
//! let engine = FormatEngine::new()?;
//! let options = ScanOptions::default().with_resolution(Resolution::HOUR);
//! let scanner = Scanner::new(&engine, options, ["ERROR", "WARN"])?;
//!
//! let report = scanner.scan(["app.log", "app.log.1"])?;
//! for (bucket, counts) in report.rows() {
//!     println!("{bucket} {counts:?}");
//! }
//! # Ok::<(), datechop_scan::ScanError>(())
//! ```

pub mod error;
pub mod options;
pub mod predicate;
pub mod report;
pub mod scan;

pub use error::{Result, ScanError};
pub use options::ScanOptions;
pub use predicate::{MatchMode, Predicate};
pub use report::{BucketCounts, ScanReport};
pub use scan::{Scanner, scan};
