//! Hour-angle solver for a target solar altitude.
//!
//! Given the observer latitude and the solar declination, the hour angle
//! `H` at which the Sun's centre stands at altitude `h` satisfies
//!
//! `cos H = (sin h - sin(phi) sin(dec)) / (cos(phi) cos(dec))`
//!
//! Altitudes are signed: twilight and horizon events use negative values
//! (depression below the horizon), Asr uses a positive altitude. When
//! `|cos H| > 1` the Sun never reaches (or never leaves) that altitude on
//! the day in question.

use miqat_time::normalize_hours;

use crate::altitude_types::{Crossing, Side};
use crate::solar_position::SolarPosition;

/// Degrees of hour angle per hour of time.
const DEG_PER_HOUR: f64 = 15.0;

/// `cos H` for the Sun at `altitude_deg`, unclamped.
///
/// Values outside [-1, 1] mean no crossing.
pub fn cos_hour_angle(altitude_deg: f64, latitude_deg: f64, declination_deg: f64) -> f64 {
    let h = altitude_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let dec = declination_deg.to_radians();
    (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())
}

/// Hour angle, in hours, at which the Sun reaches `altitude_deg`.
pub fn hour_angle_hours(altitude_deg: f64, latitude_deg: f64, declination_deg: f64) -> Crossing {
    let cos_h = cos_hour_angle(altitude_deg, latitude_deg, declination_deg);
    if cos_h > 1.0 {
        return Crossing::NeverReaches;
    }
    if cos_h < -1.0 {
        return Crossing::NeverDescends;
    }
    // Also catches NaN from cos(phi) = 0 at the poles: neither branch
    // above fires, so reject it here.
    if cos_h.is_nan() {
        return Crossing::NeverReaches;
    }
    Crossing::At(cos_h.acos().to_degrees() / DEG_PER_HOUR)
}

/// UTC hour of solar transit, counted from 0h UT of the model's day.
///
/// `12 - longitude/15 - EqT`, not wrapped: near the date line the value
/// can fall slightly outside [0, 24).
pub fn transit_hours(solar: &SolarPosition, longitude_deg: f64) -> f64 {
    12.0 - longitude_deg / DEG_PER_HOUR - solar.equation_of_time_hours
}

/// UTC hour at which the Sun crosses `altitude_deg` on `side` of transit,
/// counted from 0h UT of the model's day and not wrapped.
///
/// Evening events past midnight come out above 24 and early-morning
/// events before midnight come out negative, so the six daily events keep
/// their order.
pub fn crossing_hours(
    altitude_deg: f64,
    side: Side,
    solar: &SolarPosition,
    latitude_deg: f64,
    longitude_deg: f64,
) -> Crossing {
    hour_angle_hours(altitude_deg, latitude_deg, solar.declination_deg)
        .map(|h| transit_hours(solar, longitude_deg) + side.sign() * h)
}

/// UTC clock hour at which the Sun crosses `altitude_deg` on `side` of noon.
///
/// `time = 12 -/+ H - longitude/15 - EqT`, wrapped into [0, 24).
pub fn sun_altitude_time(
    altitude_deg: f64,
    side: Side,
    solar: &SolarPosition,
    latitude_deg: f64,
    longitude_deg: f64,
) -> Crossing {
    crossing_hours(altitude_deg, side, solar, latitude_deg, longitude_deg).map(normalize_hours)
}

/// UTC clock hour of local solar noon (Dhuhr).
///
/// `12 - longitude/15 - EqT`, wrapped into [0, 24).
pub fn midday(solar: &SolarPosition, longitude_deg: f64) -> f64 {
    normalize_hours(transit_hours(solar, longitude_deg))
}

/// Solar altitude in degrees at which an object's shadow equals
/// `shadow_factor` times its height plus its noon shadow.
///
/// `|atan(1 / (factor + tan|phi - dec|))|`; the matching zenith distance is
/// `90 - altitude`.
pub fn asr_altitude_deg(shadow_factor: f64, latitude_deg: f64, declination_deg: f64) -> f64 {
    let noon_zenith = (latitude_deg - declination_deg).abs().to_radians();
    (1.0 / (shadow_factor + noon_zenith.tan()))
        .atan()
        .to_degrees()
        .abs()
}

/// UTC hour of Asr for the given shadow factor, unwrapped like
/// [`crossing_hours`].
pub fn asr_crossing_hours(
    shadow_factor: f64,
    solar: &SolarPosition,
    latitude_deg: f64,
    longitude_deg: f64,
) -> Crossing {
    let altitude = asr_altitude_deg(shadow_factor, latitude_deg, solar.declination_deg);
    crossing_hours(altitude, Side::AfterNoon, solar, latitude_deg, longitude_deg)
}

/// UTC clock hour of Asr for the given shadow factor.
pub fn asr_time(
    shadow_factor: f64,
    solar: &SolarPosition,
    latitude_deg: f64,
    longitude_deg: f64,
) -> Crossing {
    asr_crossing_hours(shadow_factor, solar, latitude_deg, longitude_deg).map(normalize_hours)
}

#[cfg(test)]
mod tests {
    use miqat_time::calendar_to_jd;
    use proptest::prelude::*;

    use super::*;
    use crate::altitude_types::SUNRISE_DEPRESSION_DEG;
    use crate::solar_position::solar_position;

    fn equator_equinox() -> SolarPosition {
        solar_position(calendar_to_jd(2024, 3, 20.0))
    }

    #[test]
    fn cos_h_equator_equinox() {
        // phi = 0, dec = 0: cos(H) = sin(h0)
        let cos_h = cos_hour_angle(-SUNRISE_DEPRESSION_DEG, 0.0, 0.0);
        assert!((cos_h - (-0.01454)).abs() < 0.001, "cos_h = {cos_h}");
    }

    #[test]
    fn polar_night_never_reaches_horizon() {
        // 70N at the December solstice
        let result = hour_angle_hours(-SUNRISE_DEPRESSION_DEG, 70.0, -23.44);
        assert_eq!(result, Crossing::NeverReaches);
    }

    #[test]
    fn midnight_sun_never_descends() {
        let result = hour_angle_hours(-SUNRISE_DEPRESSION_DEG, 70.0, 23.44);
        assert_eq!(result, Crossing::NeverDescends);
    }

    #[test]
    fn pole_has_no_crossing() {
        assert!(!hour_angle_hours(-18.0, 90.0, 10.0).is_solved());
    }

    #[test]
    fn horizon_hour_angle_near_six_hours_at_equator() {
        let h = hour_angle_hours(-SUNRISE_DEPRESSION_DEG, 0.0, 0.0)
            .hours()
            .unwrap();
        // 6h plus ~3.3 min for refraction and semidiameter
        assert!((h - 6.0555).abs() < 0.001, "H = {h}");
    }

    #[test]
    fn sunrise_and_sunset_symmetric_about_noon() {
        let sp = equator_equinox();
        let rise = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::BeforeNoon, &sp, 30.0, 10.0)
            .hours()
            .unwrap();
        let set = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon, &sp, 30.0, 10.0)
            .hours()
            .unwrap();
        let noon = midday(&sp, 10.0);
        assert!(((rise + set) / 2.0 - noon).abs() < 1e-9);
    }

    #[test]
    fn equator_equinox_reference_times() {
        let sp = equator_equinox();
        let fajr = sun_altitude_time(-18.0, Side::BeforeNoon, &sp, 0.0, 0.0)
            .hours()
            .unwrap();
        let sunrise = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::BeforeNoon, &sp, 0.0, 0.0)
            .hours()
            .unwrap();
        let sunset = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon, &sp, 0.0, 0.0)
            .hours()
            .unwrap();
        // 04:48:32, 05:57:13, 18:03:52
        assert!((fajr - (4.0 + 48.0 / 60.0 + 32.5 / 3600.0)).abs() < 2.0 / 3600.0, "{fajr}");
        assert!((sunrise - (5.0 + 57.0 / 60.0 + 13.5 / 3600.0)).abs() < 2.0 / 3600.0, "{sunrise}");
        assert!((sunset - (18.0 + 3.0 / 60.0 + 52.5 / 3600.0)).abs() < 2.0 / 3600.0, "{sunset}");
    }

    #[test]
    fn midday_greenwich() {
        let sp = equator_equinox();
        let noon = midday(&sp, 0.0);
        assert!((noon - (12.0 - sp.equation_of_time_hours)).abs() < 1e-12);
    }

    #[test]
    fn midday_shifts_with_longitude() {
        let sp = equator_equinox();
        // 90E transits six hours earlier in UTC
        let diff = midday(&sp, 0.0) - midday(&sp, 90.0);
        assert!((diff - 6.0).abs() < 1e-12);
    }

    #[test]
    fn midday_wraps_far_east() {
        let sp = equator_equinox();
        let noon = midday(&sp, 180.0);
        assert!((0.0..24.0).contains(&noon));
        assert!((noon - (0.0 - sp.equation_of_time_hours).rem_euclid(24.0)).abs() < 1e-9);
    }

    #[test]
    fn evening_crossing_runs_past_midnight_utc() {
        // 40N 120W at the June solstice: sunset after 03:00 UT the next day
        let sp = solar_position(calendar_to_jd(2024, 6, 21.0));
        let set = crossing_hours(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon, &sp, 40.0, -120.0)
            .hours()
            .unwrap();
        let wrapped = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon, &sp, 40.0, -120.0)
            .hours()
            .unwrap();
        assert!(set > 24.0, "set = {set}");
        assert!((set - 24.0 - wrapped).abs() < 1e-9);
        assert!(transit_hours(&sp, -120.0) < set);
    }

    #[test]
    fn transit_past_date_line_is_not_wrapped() {
        let sp = equator_equinox();
        let t = transit_hours(&sp, -180.0);
        assert!((t - (24.0 - sp.equation_of_time_hours)).abs() < 1e-12);
    }

    #[test]
    fn asr_altitude_equator_equinox_shafii() {
        // Sun overhead at noon: shadow = height at 45 degrees altitude
        assert!((asr_altitude_deg(1.0, 0.0, 0.0) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn asr_altitude_hanafi_is_lower() {
        let shafii = asr_altitude_deg(1.0, 40.0, 10.0);
        let hanafi = asr_altitude_deg(2.0, 40.0, 10.0);
        assert!(hanafi < shafii);
        assert!((asr_altitude_deg(2.0, 0.0, 0.0) - 26.565_051).abs() < 1e-6);
    }

    #[test]
    fn asr_after_noon_before_sunset() {
        let sp = equator_equinox();
        let noon = midday(&sp, 0.0);
        let asr = asr_time(1.0, &sp, 0.0, 0.0).hours().unwrap();
        let set = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon, &sp, 0.0, 0.0)
            .hours()
            .unwrap();
        assert!(noon < asr && asr < set, "noon {noon} asr {asr} set {set}");
    }

    #[test]
    fn asr_unsolvable_in_polar_night() {
        let sp = solar_position(calendar_to_jd(2024, 12, 21.0));
        assert!(!asr_time(1.0, &sp, 78.22, 15.65).is_solved());
    }

    proptest! {
        #[test]
        fn rise_and_set_symmetric_about_noon(
            lat in -60.0f64..60.0,
            lon in -180.0f64..180.0,
            day in 0u32..366,
        ) {
            let sp = solar_position(calendar_to_jd(2024, 1, 1.0) + f64::from(day));
            let h = hour_angle_hours(-SUNRISE_DEPRESSION_DEG, lat, sp.declination_deg)
                .hours()
                .unwrap();
            let rise = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::BeforeNoon, &sp, lat, lon)
                .hours()
                .unwrap();
            let set = sun_altitude_time(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon, &sp, lat, lon)
                .hours()
                .unwrap();
            let noon = midday(&sp, lon);
            prop_assert!((normalize_hours(noon - rise) - h).abs() < 1e-9);
            prop_assert!((normalize_hours(set - noon) - h).abs() < 1e-9);
        }

        #[test]
        fn unwrapped_crossings_bracket_transit(
            lat in -60.0f64..60.0,
            lon in -180.0f64..180.0,
            day in 0u32..366,
            depression in 0.833f64..20.0,
        ) {
            let sp = solar_position(calendar_to_jd(2024, 1, 1.0) + f64::from(day));
            let rise = crossing_hours(-depression, Side::BeforeNoon, &sp, lat, lon);
            let set = crossing_hours(-depression, Side::AfterNoon, &sp, lat, lon);
            prop_assume!(rise.is_solved() && set.is_solved());
            let noon = transit_hours(&sp, lon);
            let (rise, set) = (rise.hours().unwrap(), set.hours().unwrap());
            prop_assert!(rise < noon && noon < set);
            let wrapped = sun_altitude_time(-depression, Side::AfterNoon, &sp, lat, lon)
                .hours()
                .unwrap();
            prop_assert!((normalize_hours(set) - wrapped).abs() < 1e-9);
        }

        #[test]
        fn higher_altitude_shortens_hour_angle(
            lat in -60.0f64..60.0,
            dec in -23.44f64..23.44,
            altitude in -20.0f64..40.0,
            step in 0.1f64..10.0,
        ) {
            let low = hour_angle_hours(altitude, lat, dec);
            let high = hour_angle_hours(altitude + step, lat, dec);
            prop_assume!(low.is_solved() && high.is_solved());
            prop_assert!(high.hours().unwrap() < low.hours().unwrap());
        }
    }
}
