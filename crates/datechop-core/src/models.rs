//! Core data types for datechop.
//!
//! This module defines the configuration values used throughout the library:
//! - [`Resolution`] - Bucket width in seconds
//! - [`NonexistentPolicy`] - How to handle nonexistent local times
//! - [`AmbiguousPolicy`] - How to handle ambiguous local times
//! - [`Policy`] - Combined DST handling policy
//! - [`Shift`] - Adjustment applied to parsed timestamps before bucketing

use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{DateChopError, Result};

/// Bucket width in whole seconds. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Resolution(i64);

impl Resolution {
    /// One minute, the default bucket width.
    pub const MINUTE: Resolution = Resolution(60);
    pub const HOUR: Resolution = Resolution(3600);

    /// Validate a resolution. Zero or negative widths are rejected.
    pub fn new(seconds: i64) -> Result<Self> {
        if seconds > 0 {
            Ok(Resolution(seconds))
        } else {
            Err(DateChopError::InvalidResolution(seconds))
        }
    }

    pub fn seconds(self) -> i64 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::MINUTE
    }
}

impl TryFrom<i64> for Resolution {
    type Error = DateChopError;

    fn try_from(seconds: i64) -> Result<Self> {
        Resolution::new(seconds)
    }
}

impl From<Resolution> for i64 {
    fn from(resolution: Resolution) -> i64 {
        resolution.0
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Policy for handling nonexistent local times.
///
/// Nonexistent times occur during DST spring forward when a range
/// of local times is skipped (e.g., 02:00-02:59 in Europe/Berlin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonexistentPolicy {
    /// Return an error for nonexistent times.
    #[default]
    Error,
    /// Shift forward by the length of the gap.
    ShiftForward,
}

impl FromStr for NonexistentPolicy {
    type Err = DateChopError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(NonexistentPolicy::Error),
            "shift_forward" => Ok(NonexistentPolicy::ShiftForward),
            _ => Err(DateChopError::PolicyError(format!(
                "Unknown nonexistent policy: '{}'. Expected 'error' or 'shift_forward'",
                s
            ))),
        }
    }
}

/// Policy for handling ambiguous local times.
///
/// Ambiguous times occur during DST fall back when a range
/// of local times occurs twice (e.g., 02:00-02:59 in Europe/Berlin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousPolicy {
    /// Return an error for ambiguous times.
    #[default]
    Error,
    /// Use the first occurrence (earlier offset, still in DST).
    First,
    /// Use the second occurrence (later offset, back to standard time).
    Second,
}

impl FromStr for AmbiguousPolicy {
    type Err = DateChopError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(AmbiguousPolicy::Error),
            "first" => Ok(AmbiguousPolicy::First),
            "second" => Ok(AmbiguousPolicy::Second),
            _ => Err(DateChopError::PolicyError(format!(
                "Unknown ambiguous policy: '{}'. Expected 'error', 'first' or 'second'",
                s
            ))),
        }
    }
}

/// Combined DST handling policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// How to handle nonexistent local times.
    pub nonexistent: NonexistentPolicy,
    /// How to handle ambiguous local times.
    pub ambiguous: AmbiguousPolicy,
}

/// Adjustment applied to a parsed timestamp before it is bucketed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    /// Use timestamps as parsed.
    #[default]
    None,
    /// Add a fixed number of hours (a GMT offset).
    Hours(i64),
    /// Treat timestamps as wall-clock time in `tz` and convert to UTC.
    Zone {
        tz: Tz,
        #[serde(default)]
        policy: Policy,
    },
}

impl FromStr for Shift {
    type Err = DateChopError;

    /// Accepts `none`, a signed hour count such as `+6` or `-5`, or an IANA
    /// zone name (converted with the default, erroring, policy).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") || trimmed.is_empty() {
            return Ok(Shift::None);
        }
        if let Ok(hours) = trimmed.parse::<i64>() {
            return Ok(Shift::Hours(hours));
        }
        let tz = crate::zone::parse_tz(trimmed)?;
        Ok(Shift::Zone {
            tz,
            policy: Policy::default(),
        })
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shift::None => write!(f, "none"),
            Shift::Hours(hours) => write!(f, "{:+}", hours),
            Shift::Zone { tz, .. } => write!(f, "{}", tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_default_is_one_minute() {
        assert_eq!(Resolution::default().seconds(), 60);
    }

    #[test]
    fn resolution_rejects_non_positive() {
        assert!(matches!(
            Resolution::new(0),
            Err(DateChopError::InvalidResolution(0))
        ));
        assert!(Resolution::new(-60).is_err());
        assert_eq!(Resolution::new(600).unwrap().seconds(), 600);
    }

    #[test]
    fn resolution_serialization() {
        let r: Resolution = serde_json::from_str("3600").unwrap();
        assert_eq!(r, Resolution::HOUR);
        assert_eq!(serde_json::to_string(&r).unwrap(), "3600");
        assert!(serde_json::from_str::<Resolution>("0").is_err());
    }

    #[test]
    fn policy_default_is_error_error() {
        let policy = Policy::default();
        assert_eq!(policy.nonexistent, NonexistentPolicy::Error);
        assert_eq!(policy.ambiguous, AmbiguousPolicy::Error);
    }

    #[test]
    fn policy_from_str() {
        assert_eq!(
            "shift_forward".parse::<NonexistentPolicy>().unwrap(),
            NonexistentPolicy::ShiftForward
        );
        assert_eq!(
            "Second".parse::<AmbiguousPolicy>().unwrap(),
            AmbiguousPolicy::Second
        );
        assert!("later".parse::<AmbiguousPolicy>().is_err());
    }

    #[test]
    fn shift_from_str() {
        assert_eq!("none".parse::<Shift>().unwrap(), Shift::None);
        assert_eq!("+6".parse::<Shift>().unwrap(), Shift::Hours(6));
        assert_eq!("-5".parse::<Shift>().unwrap(), Shift::Hours(-5));
        assert_eq!(
            "Europe/Berlin".parse::<Shift>().unwrap(),
            Shift::Zone {
                tz: chrono_tz::Europe::Berlin,
                policy: Policy::default()
            }
        );
        assert!(matches!(
            "Mars/Olympus".parse::<Shift>(),
            Err(DateChopError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn shift_display() {
        assert_eq!(Shift::Hours(6).to_string(), "+6");
        assert_eq!(Shift::Hours(-5).to_string(), "-5");
        assert_eq!(Shift::None.to_string(), "none");
    }

    #[test]
    fn shift_deserialization() {
        let shift: Shift = serde_json::from_str(r#"{"hours": 6}"#).unwrap();
        assert_eq!(shift, Shift::Hours(6));

        let shift: Shift = serde_json::from_str(
            r#"{"zone": {"tz": "Europe/Berlin", "policy": {"ambiguous": "first"}}}"#,
        )
        .unwrap();
        assert_eq!(
            shift,
            Shift::Zone {
                tz: chrono_tz::Europe::Berlin,
                policy: Policy {
                    nonexistent: NonexistentPolicy::Error,
                    ambiguous: AmbiguousPolicy::First,
                },
            }
        );

        let shift: Shift = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(shift, Shift::None);
    }
}
