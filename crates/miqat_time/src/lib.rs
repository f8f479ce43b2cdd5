//! Calendar and clock conversions for the prayer-time engine.
//!
//! This crate provides:
//! - Julian Day conversion for proleptic Gregorian dates
//! - Calendar-date validation on top of `chrono`
//! - Fractional-hour clock arithmetic and local wall-clock construction

pub mod clock;
pub mod error;
pub mod julian;

pub use clock::{HOURS_PER_DAY, MAX_OFFSET_HOURS, normalize_hours, utc_offset, wall_clock};
pub use error::TimeError;
pub use julian::{J2000_JD, calendar_date, calendar_to_jd, jd_from_date};
