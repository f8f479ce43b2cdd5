//! Daily schedule assembly.
//!
//! Pipeline for one date: Julian Day, solar position, one altitude
//! equation per prayer, high-latitude fallback for Fajr/Isha, method
//! offsets, manual adjustments, then conversion to local wall clock.
//!
//! Hours are never wrapped into a 24-hour clock. Each event keeps its
//! signed distance from solar transit, so an Isha after local midnight
//! lands on the next calendar day instead of the early hours of the
//! requested one.

use log::{debug, warn};
use miqat_solar::{
    Crossing, SUNRISE_DEPRESSION_DEG, Side, asr_crossing_hours, crossing_hours, solar_position,
    transit_hours,
};
use miqat_time::{HOURS_PER_DAY, jd_from_date, wall_clock};

use crate::error::{PrayerError, Unresolved};
use crate::high_latitude::{HighLatitudeRule, adjust};
use crate::method::{AsrConvention, CalculationMethod, IshaRule};
use crate::schedule_types::{
    DayHours, GeoTime, Prayer, PrayerConfig, PrayerSchedule, PrayerTime, TimeAdjustments,
};

/// Fajr or Isha at a twilight depression, falling back to the
/// high-latitude rule when the Sun never gets that deep.
fn twilight(
    prayer: Prayer,
    crossing: Crossing,
    rule: HighLatitudeRule,
    angle_deg: f64,
    side: Side,
    sunrise: Crossing,
    sunset: Crossing,
) -> Result<f64, Unresolved> {
    if let Crossing::At(h) = crossing {
        return Ok(h);
    }
    let fallback = adjust(rule, angle_deg, side, sunrise, sunset);
    if let Ok(h) = fallback {
        warn!("{prayer}: twilight {angle_deg} deg not reached, {rule} estimate {h:.4} h UTC");
    }
    fallback
}

/// Horizon events: the Sun neither rising nor setting is a polar condition.
fn horizon(crossing: Crossing) -> Result<f64, Unresolved> {
    crossing.hours().ok_or(Unresolved::PolarCondition)
}

/// Whole days between the requested local date and the UTC day whose
/// solar transit falls on it.
///
/// Zero unless the offset is more than twelve hours away from the
/// longitude's mean solar time, as on either side of the date line.
fn local_day_shift(geo: &GeoTime) -> f64 {
    ((geo.timezone_offset_hours() - geo.longitude_deg() / 15.0) / HOURS_PER_DAY).round()
}

/// Fractional UTC hours of the six events, before timezone conversion.
///
/// Hours count from 0h UT on the requested date and are not wrapped:
/// adding the timezone offset gives hours from local midnight, with local
/// solar noon on the requested date. Method offsets and manual
/// adjustments are already applied.
pub fn compute_day_hours(geo: &GeoTime, config: &PrayerConfig) -> DayHours {
    let lat = geo.latitude_deg();
    let lon = geo.longitude_deg();
    let params = config.method.params();
    let rule = config.high_latitude_rule;

    let shift = local_day_shift(geo);
    let base = -shift * HOURS_PER_DAY;
    let jd = jd_from_date(geo.date()) - shift;
    let solar = solar_position(jd);
    debug!(
        "{} jd={jd} M={:.4} L={:.4} EqT={:.6} h dec={:.4}",
        geo.date(),
        solar.mean_anomaly_deg,
        solar.ecliptic_longitude_deg,
        solar.equation_of_time_hours,
        solar.declination_deg,
    );
    let at = |altitude_deg: f64, side: Side| {
        crossing_hours(altitude_deg, side, &solar, lat, lon).map(|h| h + base)
    };

    let sunrise_x = at(-SUNRISE_DEPRESSION_DEG, Side::BeforeNoon);
    let sunset_x = at(-SUNRISE_DEPRESSION_DEG, Side::AfterNoon);

    let fajr = twilight(
        Prayer::Fajr,
        at(-params.fajr_angle_deg, Side::BeforeNoon),
        rule,
        params.fajr_angle_deg,
        Side::BeforeNoon,
        sunrise_x,
        sunset_x,
    );
    let sunrise = horizon(sunrise_x);
    let dhuhr = Ok(transit_hours(&solar, lon) + base);
    let asr = asr_crossing_hours(config.asr_convention.shadow_factor(), &solar, lat, lon)
        .map(|h| h + base)
        .hours()
        .ok_or(Unresolved::NoSolution);
    let maghrib = horizon(sunset_x).map(|h| h + params.maghrib_offset_minutes / 60.0);
    let isha = match params.isha {
        IshaRule::MinutesAfterMaghrib(minutes) => maghrib.map(|h| h + minutes / 60.0),
        IshaRule::Angle(angle) => twilight(
            Prayer::Isha,
            at(-angle, Side::AfterNoon),
            rule,
            angle,
            Side::AfterNoon,
            sunrise_x,
            sunset_x,
        ),
    };

    let adj = &config.adjustments;
    let finish = |prayer: Prayer, value: Result<f64, Unresolved>| {
        value.map(|h| h + adj.hours(prayer))
    };
    DayHours {
        fajr: finish(Prayer::Fajr, fajr),
        sunrise: finish(Prayer::Sunrise, sunrise),
        dhuhr: finish(Prayer::Dhuhr, dhuhr),
        asr: finish(Prayer::Asr, asr),
        maghrib: finish(Prayer::Maghrib, maghrib),
        isha: finish(Prayer::Isha, isha),
    }
}

/// Local prayer times for a validated location and date.
///
/// Never fails: a prayer whose equation has no root is carried as
/// `Err(Unresolved)` in its own field and the others are unaffected.
/// Events before local midnight or after the following one carry the
/// neighbouring calendar date.
pub fn compute_schedule(geo: &GeoTime, config: &PrayerConfig) -> PrayerSchedule {
    let hours = compute_day_hours(geo, config);
    let date = geo.date();
    let offset = geo.offset();
    let offset_hours = f64::from(offset.local_minus_utc()) / 3600.0;
    let local = |prayer: Prayer| -> PrayerTime {
        hours
            .get(prayer)
            .and_then(|h| {
                // None only at the edge of chrono's calendar
                wall_clock(date, h + offset_hours, offset).ok_or(Unresolved::NoSolution)
            })
            .inspect_err(|reason| {
                warn!(
                    "{prayer} unresolved on {date} at ({:.4}, {:.4}): {reason}",
                    geo.latitude_deg(),
                    geo.longitude_deg()
                );
            })
    };
    PrayerSchedule {
        date,
        fajr: local(Prayer::Fajr),
        sunrise: local(Prayer::Sunrise),
        dhuhr: local(Prayer::Dhuhr),
        asr: local(Prayer::Asr),
        maghrib: local(Prayer::Maghrib),
        isha: local(Prayer::Isha),
    }
}

/// Validate raw inputs and compute the schedule in one call.
#[allow(clippy::too_many_arguments)]
pub fn compute_schedule_for(
    latitude_deg: f64,
    longitude_deg: f64,
    timezone_offset_hours: f64,
    ymd: (i32, u32, u32),
    method: CalculationMethod,
    asr_convention: AsrConvention,
    high_latitude_rule: HighLatitudeRule,
    adjustments: TimeAdjustments,
) -> Result<PrayerSchedule, PrayerError> {
    let geo = GeoTime::from_ymd(latitude_deg, longitude_deg, timezone_offset_hours, ymd)?;
    let config = PrayerConfig {
        method,
        asr_convention,
        high_latitude_rule,
        adjustments,
    };
    Ok(compute_schedule(&geo, &config))
}

/// Fast-breaking time (Maghrib) for one day.
pub fn iftar_time(geo: &GeoTime, config: &PrayerConfig) -> PrayerTime {
    compute_schedule(geo, config).iftar()
}

/// End of the pre-dawn meal (Fajr) for one day.
pub fn suhoor_end_time(geo: &GeoTime, config: &PrayerConfig) -> PrayerTime {
    compute_schedule(geo, config).suhoor_end()
}
