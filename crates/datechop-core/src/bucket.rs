//! Bucket computation.
//!
//! A bucket key is a timestamp truncated to a resolution. Truncation is done
//! on epoch seconds rather than calendar fields, so bucket boundaries do not
//! depend on month lengths, and on naive time, so no zone or DST rule can
//! move a boundary.

use chrono::{DateTime, NaiveDateTime};

use crate::error::{DateChopError, Result};
use crate::models::{Resolution, Shift};
use crate::parse::FormatSpec;
use crate::zone::apply_shift;

/// Truncate `timestamp` down to a multiple of `resolution` seconds since
/// the epoch.
///
/// Sub-second precision is always dropped. Timestamps before 1970 floor
/// towards the past, like every other timestamp.
///
/// # Arguments
///
/// * `timestamp` - The naive timestamp to truncate
/// * `resolution` - The bucket width
///
/// # Returns
///
/// The start of the bucket containing `timestamp`.
///
/// # Examples
///
/// ```
/// use datechop_core::{Resolution, bucket, parse};
///
/// let ts = parse("1976/05/19 12:05:17", "%Y/%m/%d %H:%M:%S").unwrap();
/// let minute = bucket(ts, Resolution::MINUTE).unwrap();
/// let hour = bucket(ts, Resolution::HOUR).unwrap();
///
/// assert_eq!(minute.to_string(), "1976-05-19 12:05:00");
/// assert_eq!(hour.to_string(), "1976-05-19 12:00:00");
/// ```
pub fn bucket(timestamp: NaiveDateTime, resolution: Resolution) -> Result<NaiveDateTime> {
    let width = resolution.seconds();
    let epoch_seconds = timestamp.and_utc().timestamp();
    let floored = epoch_seconds.div_euclid(width) * width;

    DateTime::from_timestamp(floored, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            DateChopError::OutOfRange(format!("{} truncated to {}", timestamp, resolution))
        })
}

/// Parse a line with a known format, apply a shift, and bucket the result.
///
/// Fails with [`DateChopError::DateParseFailure`] when the line carries no
/// timestamp in `format`.
pub fn date_chop(
    line: &str,
    format: &FormatSpec,
    shift: &Shift,
    resolution: Resolution,
) -> Result<NaiveDateTime> {
    let timestamp = format.parse(line)?;
    let shifted = apply_shift(timestamp, shift)?;
    bucket(shifted, resolution)
}
