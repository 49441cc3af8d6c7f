//! Scan configuration.

use datechop_core::{Resolution, Shift};
use serde::{Deserialize, Serialize};

use crate::predicate::MatchMode;

/// Options controlling how files are scanned.
///
/// Deserializes from a partial document; missing keys take their defaults:
///
/// ```
/// use datechop_scan::ScanOptions;
///
/// let options: ScanOptions = serde_json::from_str(r#"{"resolution": 600}"#).unwrap();
/// assert_eq!(options.resolution.seconds(), 600);
/// assert!(options.format.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Bucket width (default 60 seconds).
    pub resolution: Resolution,
    /// Template applied to every file. `None` guesses once per file.
    pub format: Option<String>,
    /// Adjustment applied to parsed timestamps before bucketing.
    pub shift: Shift,
    /// How predicate strings are interpreted.
    pub match_mode: MatchMode,
}

impl ScanOptions {
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}
