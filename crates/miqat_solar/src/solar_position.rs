//! Low-precision solar coordinates.
//!
//! Almanac-style model: linear mean anomaly, two-term equation of centre,
//! fixed obliquity of the ecliptic. Declination is good to a few
//! arcminutes, well inside the minute-level precision prayer times need.
//!
//! All angles are carried in degrees; trigonometry goes through
//! `to_radians`/`to_degrees`.

use miqat_time::J2000_JD;

use crate::util::normalize_360;

/// Mean daily motion of the Sun in degrees.
const MEAN_MOTION_DEG_PER_DAY: f64 = 0.9856;

/// Mean anomaly offset at the J2000.0 epoch, degrees.
const MEAN_ANOMALY_OFFSET_DEG: f64 = 3.289;

/// Longitude of perihelion, degrees.
const PERIHELION_LONGITUDE_DEG: f64 = 282.634;

/// cos(obliquity) for the ecliptic-to-equatorial rotation.
const COS_OBLIQUITY: f64 = 0.91746;

/// sin(obliquity).
const SIN_OBLIQUITY: f64 = 0.39782;

/// Solar coordinates for one Julian Date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Mean anomaly in degrees, [0, 360).
    pub mean_anomaly_deg: f64,
    /// Apparent ecliptic longitude in degrees, [0, 360).
    pub ecliptic_longitude_deg: f64,
    /// Right ascension in hours, in the same 6-hour sector as the longitude.
    pub right_ascension_hours: f64,
    /// Equation of time in hours (`L/15 - RA`).
    pub equation_of_time_hours: f64,
    /// Declination in degrees, north positive.
    pub declination_deg: f64,
}

/// Days elapsed since J2000.0.
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}

/// Mean anomaly in degrees for `d` days since J2000.0.
pub fn mean_anomaly_deg(d: f64) -> f64 {
    normalize_360(MEAN_MOTION_DEG_PER_DAY * d - MEAN_ANOMALY_OFFSET_DEG)
}

/// Ecliptic longitude in degrees from the mean anomaly.
///
/// `L = M + 1.916 sin M + 0.020 sin 2M + 282.634`, normalized to [0, 360).
pub fn ecliptic_longitude_deg(mean_anomaly_deg: f64) -> f64 {
    let m = mean_anomaly_deg.to_radians();
    normalize_360(
        mean_anomaly_deg + 1.916 * m.sin() + 0.020 * (2.0 * m).sin() + PERIHELION_LONGITUDE_DEG,
    )
}

/// Right ascension in hours for an ecliptic longitude in degrees.
///
/// The raw `atan2` result is moved into the 90-degree sector of the
/// longitude. Away from the sector edges RA and L already share a sector;
/// the alignment only matters where rounding noise pushes one of them
/// across an edge, and aligning to the nearest multiple of 90 keeps the
/// result continuous there.
pub fn right_ascension_hours(ecliptic_longitude_deg: f64) -> f64 {
    let l = ecliptic_longitude_deg.to_radians();
    let ra = normalize_360((COS_OBLIQUITY * l.sin()).atan2(l.cos()).to_degrees());
    let sector_shift = ((ecliptic_longitude_deg - ra) / 90.0).round() * 90.0;
    (ra + sector_shift) / 15.0
}

/// Declination in degrees for an ecliptic longitude in degrees.
pub fn declination_deg(ecliptic_longitude_deg: f64) -> f64 {
    (SIN_OBLIQUITY * ecliptic_longitude_deg.to_radians().sin())
        .asin()
        .to_degrees()
}

/// Compute the solar position for a Julian Date.
pub fn solar_position(jd: f64) -> SolarPosition {
    let d = days_since_j2000(jd);
    let mean_anomaly = mean_anomaly_deg(d);
    let longitude = ecliptic_longitude_deg(mean_anomaly);
    let ra_hours = right_ascension_hours(longitude);

    SolarPosition {
        mean_anomaly_deg: mean_anomaly,
        ecliptic_longitude_deg: longitude,
        right_ascension_hours: ra_hours,
        equation_of_time_hours: longitude / 15.0 - ra_hours,
        declination_deg: declination_deg(longitude),
    }
}

#[cfg(test)]
mod tests {
    use miqat_time::calendar_to_jd;

    use super::*;

    #[test]
    fn equinox_2024_reference_values() {
        let sp = solar_position(calendar_to_jd(2024, 3, 20.0));
        assert!((sp.mean_anomaly_deg - 73.8502).abs() < 1e-6, "{sp:?}");
        assert!((sp.ecliptic_longitude_deg - 358.335_277).abs() < 1e-5, "{sp:?}");
        assert!((sp.equation_of_time_hours - (-0.009_155_88)).abs() < 1e-6, "{sp:?}");
        assert!((sp.declination_deg - (-0.662_181_6)).abs() < 1e-5, "{sp:?}");
    }

    #[test]
    fn june_solstice_declination() {
        let sp = solar_position(calendar_to_jd(2024, 6, 21.0));
        assert!((sp.declination_deg - 23.4347).abs() < 1e-3, "{sp:?}");
    }

    #[test]
    fn december_solstice_declination() {
        let sp = solar_position(calendar_to_jd(2024, 12, 21.0));
        assert!((sp.declination_deg - (-23.4273)).abs() < 1e-3, "{sp:?}");
    }

    #[test]
    fn declination_bounded_by_obliquity() {
        let max = SIN_OBLIQUITY.asin().to_degrees();
        for day in 0..366 {
            let sp = solar_position(calendar_to_jd(2024, 1, 1.0) + f64::from(day));
            assert!(sp.declination_deg.abs() <= max + 1e-12, "day {day}: {sp:?}");
        }
    }

    #[test]
    fn equation_of_time_stays_small_all_year() {
        for day in 0..366 {
            let sp = solar_position(calendar_to_jd(2024, 1, 1.0) + f64::from(day));
            let minutes = sp.equation_of_time_hours * 60.0;
            assert!(minutes.abs() < 10.5, "day {day}: EqT = {minutes} min");
        }
    }

    #[test]
    fn right_ascension_same_sector_as_longitude() {
        for tenth in 0..3600 {
            let l = f64::from(tenth) / 10.0;
            let ra_deg = right_ascension_hours(l) * 15.0;
            assert!((ra_deg - l).abs() < 3.0, "L = {l}, RA = {ra_deg}");
        }
    }

    #[test]
    fn right_ascension_continuous_at_sector_edges() {
        for edge in [0.0, 90.0, 180.0, 270.0, 360.0_f64] {
            for eps in [1e-12, 1e-9, 1e-6] {
                let below = right_ascension_hours(edge - eps) * 15.0;
                let at = right_ascension_hours(edge) * 15.0;
                let above = right_ascension_hours(edge + eps) * 15.0;
                // 0 and 360 are the same point, so compare modulo a full turn
                let near = |a: f64, b: f64| {
                    let d = (a - b).rem_euclid(360.0);
                    d.min(360.0 - d) < 1e-3
                };
                assert!(near(below, at), "edge {edge} eps {eps}: {below} vs {at}");
                assert!(near(at, above), "edge {edge} eps {eps}: {at} vs {above}");
            }
        }
    }

    #[test]
    fn equation_of_time_continuous_at_sector_edges() {
        for edge in [90.0, 180.0, 270.0_f64] {
            let eqt = |l: f64| l / 15.0 - right_ascension_hours(l);
            let jump = (eqt(edge - 1e-9) - eqt(edge + 1e-9)).abs();
            assert!(jump < 1e-6, "edge {edge}: jump {jump} h");
        }
    }

    #[test]
    fn j2000_is_day_zero() {
        assert_eq!(days_since_j2000(J2000_JD), 0.0);
    }
}
