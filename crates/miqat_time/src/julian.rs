//! Julian Day conversion for proleptic Gregorian calendar dates.
//!
//! Standard Gregorian-to-Julian algorithm (Meeus, *Astronomical Algorithms*,
//! ch. 7). Valid for any date from 1 AD; `f64` precision is ample for
//! years up to several thousand AD.

use chrono::{Datelike, NaiveDate};

use crate::error::TimeError;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Convert a Gregorian calendar date to a Julian Date.
///
/// `day` may carry a fractional part (e.g. `1.5` is noon on the 1st). A
/// whole-number day yields a JD ending in `.5` (0h UT).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = f64::from(y);
    let m = f64::from(m);

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date at 0h UT of a validated calendar date.
pub fn jd_from_date(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), f64::from(date.day()))
}

/// Validate a (year, month, day) triple and return it as a `NaiveDate`.
///
/// Rejects impossible dates (Feb 30, month 13, ...) and years before 1 AD.
pub fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, TimeError> {
    let invalid = TimeError::InvalidDate { year, month, day };
    if year < 1 {
        return Err(invalid);
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(invalid)
}
