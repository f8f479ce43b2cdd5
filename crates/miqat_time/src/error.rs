//! Error types for calendar and clock conversions.

use thiserror::Error;

/// Errors from calendar validation or timezone handling.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The (year, month, day) triple is not a valid proleptic Gregorian date
    /// in the supported range (years from 1 AD).
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Timezone offset is not finite or lies outside [-14, 14] hours.
    #[error("invalid timezone offset: {0} h")]
    InvalidOffset(f64),
}
