//! Fractional-hour clock arithmetic.
//!
//! The engine computes every event as a fractional hour (`13.5` = 13:30)
//! counted from midnight of the requested day. Values past 24 belong to
//! the next day and negative values to the previous one; [`wall_clock`]
//! turns such an hour into a dated instant in the caller's fixed offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};

use crate::error::TimeError;

/// Hours in a civil day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Largest accepted timezone offset magnitude in hours (UTC+14, Kiribati).
pub const MAX_OFFSET_HOURS: f64 = 14.0;

/// Wrap a fractional hour into `[0, 24)`.
pub fn normalize_hours(hours: f64) -> f64 {
    let r = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid of a tiny negative value rounds up to exactly 24.0
    if r >= HOURS_PER_DAY { 0.0 } else { r }
}

/// Build a `FixedOffset` from an offset in (possibly fractional) hours.
///
/// The offset is rounded to whole seconds; `5.75` becomes UTC+05:45.
pub fn utc_offset(offset_hours: f64) -> Result<FixedOffset, TimeError> {
    if !offset_hours.is_finite() || offset_hours.abs() > MAX_OFFSET_HOURS {
        return Err(TimeError::InvalidOffset(offset_hours));
    }
    let seconds = (offset_hours * 3600.0).round() as i32;
    FixedOffset::east_opt(seconds).ok_or(TimeError::InvalidOffset(offset_hours))
}

/// Instant `local_hours` after local midnight starting `date`, in `offset`.
///
/// Truncated to whole seconds. The hour is not wrapped: `25.0` is 01:00 on
/// the following day and `-0.5` is 23:30 on the day before. Returns `None`
/// only when the result leaves chrono's representable range.
pub fn wall_clock(
    date: NaiveDate,
    local_hours: f64,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let seconds = (local_hours * 3600.0).floor();
    if !seconds.is_finite() {
        return None;
    }
    let local = date
        .and_time(NaiveTime::default())
        .checked_add_signed(TimeDelta::try_seconds(seconds as i64)?)?;
    let utc = local.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
    Some(DateTime::from_naive_utc_and_offset(utc, offset))
}
