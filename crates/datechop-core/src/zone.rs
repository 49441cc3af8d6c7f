//! Timezone handling for [`Shift::Zone`](crate::models::Shift).
//!
//! Parsed log timestamps are naive wall-clock values. When their zone is
//! known they can be normalized to UTC wall-clock time before bucketing;
//! gaps and overlaps around DST transitions are resolved by a [`Policy`].

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{DateChopError, Result};
use crate::models::{AmbiguousPolicy, NonexistentPolicy, Policy, Shift};

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use datechop_core::zone::parse_tz;
///
/// let tz = parse_tz("Europe/Berlin").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Berlin");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| DateChopError::InvalidTimezone(name.to_string()))
}

/// Convert a local wall-clock time in `tz` to UTC wall-clock time.
///
/// Ambiguous and nonexistent local times are resolved with `policy`.
///
/// # Arguments
///
/// * `local` - The wall-clock time as parsed (without timezone)
/// * `tz` - The timezone to interpret the local time in
/// * `policy` - How to resolve DST gaps and overlaps
///
/// # Returns
///
/// The UTC wall-clock time, or a `PolicyError` if the local time is
/// nonexistent or ambiguous and the policy says to error.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz, policy: Policy) -> Result<NaiveDateTime> {
    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(first, second) => match policy.ambiguous {
            AmbiguousPolicy::Error => {
                return Err(DateChopError::PolicyError(format!(
                    "Ambiguous time '{}' in timezone '{}'. Occurs twice due to DST fall back.",
                    local.format("%Y-%m-%dT%H:%M:%S"),
                    tz
                )));
            }
            AmbiguousPolicy::First => first,
            AmbiguousPolicy::Second => second,
        },
        LocalResult::None => match policy.nonexistent {
            NonexistentPolicy::Error => {
                return Err(DateChopError::PolicyError(format!(
                    "Nonexistent time '{}' in timezone '{}'. Skipped due to DST spring forward.",
                    local.format("%Y-%m-%dT%H:%M:%S"),
                    tz
                )));
            }
            NonexistentPolicy::ShiftForward => {
                shift_forward(local, tz).ok_or_else(|| {
                    DateChopError::PolicyError(format!(
                        "Could not resolve '{}' in timezone '{}' with shift_forward policy",
                        local.format("%Y-%m-%dT%H:%M:%S"),
                        tz
                    ))
                })?
            }
        },
    };

    Ok(resolved.naive_utc())
}

/// Apply a [`Shift`] to a parsed timestamp.
///
/// # Arguments
///
/// * `timestamp` - The timestamp as parsed from a line
/// * `shift` - The adjustment to apply
///
/// # Returns
///
/// The shifted timestamp. Fails with `OutOfRange` if an hour offset leaves
/// the representable range, or with `PolicyError` from a zone conversion.
pub fn apply_shift(timestamp: NaiveDateTime, shift: &Shift) -> Result<NaiveDateTime> {
    match *shift {
        Shift::None => Ok(timestamp),
        Shift::Hours(hours) => Duration::try_hours(hours)
            .and_then(|offset| timestamp.checked_add_signed(offset))
            .ok_or_else(|| {
                DateChopError::OutOfRange(format!("{} shifted by {} hours", timestamp, hours))
            }),
        Shift::Zone { tz, policy } => local_to_utc(timestamp, tz, policy),
    }
}

/// Move a time that falls in a DST gap forward by the length of the gap,
/// preserving its minute/second offset.
fn shift_forward(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    let previous = find_valid_local_time(local, tz, -1)?;
    let next = find_valid_local_time(local, tz, 1)?;

    let gap = next.naive_local() - previous.naive_local() - Duration::seconds(1);
    let shifted = tz.from_local_datetime(&(local + gap));

    shifted.single().or_else(|| shifted.earliest()).or(Some(next))
}

/// Search second by second, in `direction`, for the nearest representable
/// local time. The two-day bound covers historical transitions with large
/// gaps.
fn find_valid_local_time(local: NaiveDateTime, tz: Tz, direction: i64) -> Option<DateTime<Tz>> {
    let max_seconds: i64 = 2 * 24 * 60 * 60;

    (1..=max_seconds).find_map(|seconds| {
        let candidate = local + Duration::seconds(seconds * direction);
        let result = tz.from_local_datetime(&candidate);
        if direction > 0 {
            result.single().or_else(|| result.earliest())
        } else {
            result.single().or_else(|| result.latest())
        }
    })
}
