//! Fallback Fajr/Isha estimates where twilight never ends.
//!
//! Above roughly 48 degrees of latitude the Sun can stay less than 18
//! degrees below the horizon all night around the summer solstice, so the
//! Fajr and Isha equations have no root. The rules here place those
//! prayers a fraction of the night away from sunrise and sunset instead.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use miqat_solar::{Crossing, Side};
use miqat_time::normalize_hours;
use serde::{Deserialize, Serialize};

use crate::error::{Unresolved, UnknownVariant};

/// How to estimate Fajr/Isha when the twilight angle is never reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighLatitudeRule {
    /// No estimate; the prayer is reported as unresolved.
    #[default]
    None,
    /// Half the night from sunset (Isha) or before sunrise (Fajr).
    MiddleOfNight,
    /// One seventh of the night.
    SeventhOfNight,
    /// `angle / 60` of the night, using the method's twilight angle.
    AngleBased,
}

const ALL_RULES: [HighLatitudeRule; 4] = [
    HighLatitudeRule::None,
    HighLatitudeRule::MiddleOfNight,
    HighLatitudeRule::SeventhOfNight,
    HighLatitudeRule::AngleBased,
];

impl HighLatitudeRule {
    /// All rules, ordered by legacy code.
    pub const fn all() -> &'static [HighLatitudeRule] {
        &ALL_RULES
    }

    /// Legacy integer code (0 = None ... 3 = AngleBased).
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::MiddleOfNight => 1,
            Self::SeventhOfNight => 2,
            Self::AngleBased => 3,
        }
    }

    /// Rule for a legacy integer code.
    pub fn from_code(code: i64) -> Option<Self> {
        let idx = usize::try_from(code).ok()?;
        ALL_RULES.get(idx).copied()
    }

    /// Short kebab-case identifier.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MiddleOfNight => "middle-of-night",
            Self::SeventhOfNight => "seventh-of-night",
            Self::AngleBased => "angle-based",
        }
    }

    /// Fraction of the night between the horizon event and the prayer,
    /// or `None` when the rule supplies no estimate.
    pub fn night_portion(self, angle_deg: f64) -> Option<f64> {
        match self {
            Self::None => None,
            Self::MiddleOfNight => Some(0.5),
            Self::SeventhOfNight => Some(1.0 / 7.0),
            Self::AngleBased => Some(angle_deg.abs() / 60.0),
        }
    }
}

impl Display for HighLatitudeRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for HighLatitudeRule {
    type Err = UnknownVariant;

    /// Accepts the kebab-case slug, the same words without separators,
    /// or a legacy code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(code) = t.parse::<i64>() {
            return Self::from_code(code).ok_or_else(|| UnknownVariant::new("high-latitude rule", s));
        }
        let squashed: String = t
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        ALL_RULES
            .iter()
            .copied()
            .find(|r| r.slug().replace('-', "") == squashed)
            .ok_or_else(|| UnknownVariant::new("high-latitude rule", s))
    }
}

/// Length of the dark interval from sunset to the next sunrise, in hours.
///
/// Both inputs belong to the same day, wrapped or not; the difference is
/// wrapped into `[0, 24)`.
pub fn night_duration_hours(sunrise_hours: f64, sunset_hours: f64) -> f64 {
    normalize_hours(sunrise_hours - sunset_hours)
}

/// Estimated hour for a prayer whose twilight equation has no root.
///
/// `side` selects Fajr (`BeforeNoon`, measured back from sunrise) or Isha
/// (`AfterNoon`, measured forward from sunset). `angle_deg` is the
/// method's twilight depression, used only by [`HighLatitudeRule::AngleBased`].
///
/// The estimate is not wrapped. It shares the time base of `sunrise` and
/// `sunset`, so Fajr may go negative (the previous evening) and Isha may
/// pass 24 (after midnight).
pub fn adjust(
    rule: HighLatitudeRule,
    angle_deg: f64,
    side: Side,
    sunrise: Crossing,
    sunset: Crossing,
) -> Result<f64, Unresolved> {
    let portion = rule.night_portion(angle_deg).ok_or(Unresolved::NoSolution)?;
    let (Some(rise), Some(set)) = (sunrise.hours(), sunset.hours()) else {
        return Err(Unresolved::PolarCondition);
    };
    let offset = night_duration_hours(rise, set) * portion;
    let estimate = match side {
        Side::BeforeNoon => rise - offset,
        Side::AfterNoon => set + offset,
    };
    Ok(estimate)
}
