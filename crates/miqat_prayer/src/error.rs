//! Error types for prayer-time calculation.

use miqat_time::TimeError;
use thiserror::Error;

/// Input rejected before any computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PrayerError {
    /// Latitude outside [-90, 90] degrees or not finite.
    #[error("invalid latitude {0} (expected -90..=90 degrees)")]
    InvalidLatitude(f64),
    /// Longitude outside [-180, 180] degrees or not finite.
    #[error("invalid longitude {0} (expected -180..=180 degrees)")]
    InvalidLongitude(f64),
    /// Invalid calendar date or timezone offset.
    #[error(transparent)]
    Time(#[from] TimeError),
}

/// Why one prayer has no time on a given day.
///
/// Carried per prayer inside a schedule; the other prayers are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Unresolved {
    /// The Sun never reaches the required angle and no high-latitude rule
    /// supplied an estimate.
    #[error("sun does not reach the required angle on this day")]
    NoSolution,
    /// The Sun does not rise or does not set, so neither the horizon events
    /// nor any night-based estimate exist.
    #[error("sun does not rise or set on this day")]
    PolarCondition,
}

/// A name or code that does not match any variant of a configuration enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
