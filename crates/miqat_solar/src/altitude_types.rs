//! Types shared by the hour-angle solver.

/// Depression of the Sun's centre at apparent sunrise/sunset, in degrees:
/// 34' horizontal refraction plus a 16' solar semidiameter, rounded.
pub const SUNRISE_DEPRESSION_DEG: f64 = 0.833;

/// Which side of solar noon an event falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Morning event (Fajr, sunrise): `12 - H`.
    BeforeNoon,
    /// Afternoon/evening event (Asr, sunset, Isha): `12 + H`.
    AfterNoon,
}

impl Side {
    /// Whether this is a morning event.
    pub fn is_before_noon(self) -> bool {
        matches!(self, Self::BeforeNoon)
    }

    /// Sign applied to the hour angle: -1 before noon, +1 after.
    pub fn sign(self) -> f64 {
        match self {
            Self::BeforeNoon => -1.0,
            Self::AfterNoon => 1.0,
        }
    }
}

/// Outcome of solving for the moment the Sun passes a target altitude.
///
/// The payload of `At` depends on the producing function: an hour angle
/// for [`hour_angle_hours`](crate::hour_angle_hours), a clock hour in
/// `[0, 24)` for [`sun_altitude_time`](crate::sun_altitude_time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The altitude is crossed; value in hours.
    At(f64),
    /// The Sun stays below the target altitude all day (`cos H > 1`).
    NeverReaches,
    /// The Sun stays above the target altitude all day (`cos H < -1`).
    NeverDescends,
}

impl Crossing {
    /// The crossing value, or `None` when the equation has no real root.
    pub fn hours(self) -> Option<f64> {
        match self {
            Self::At(h) => Some(h),
            Self::NeverReaches | Self::NeverDescends => None,
        }
    }

    /// Whether the equation had a real root.
    pub fn is_solved(self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Transform the crossing value, keeping the no-solution variants.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::At(h) => Self::At(f(h)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunrise_depression_is_50_arcmin() {
        assert!((SUNRISE_DEPRESSION_DEG - 50.0 / 60.0).abs() < 0.001);
    }

    #[test]
    fn side_sign() {
        assert_eq!(Side::BeforeNoon.sign(), -1.0);
        assert_eq!(Side::AfterNoon.sign(), 1.0);
        assert!(Side::BeforeNoon.is_before_noon());
        assert!(!Side::AfterNoon.is_before_noon());
    }

    #[test]
    fn crossing_hours() {
        assert_eq!(Crossing::At(5.5).hours(), Some(5.5));
        assert_eq!(Crossing::NeverReaches.hours(), None);
        assert_eq!(Crossing::NeverDescends.hours(), None);
    }

    #[test]
    fn crossing_map_keeps_failures() {
        assert_eq!(Crossing::At(1.0).map(|h| h + 1.0), Crossing::At(2.0));
        assert_eq!(
            Crossing::NeverReaches.map(|h| h + 1.0),
            Crossing::NeverReaches
        );
    }
}
