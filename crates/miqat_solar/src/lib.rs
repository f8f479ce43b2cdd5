//! Solar geometry for daily prayer times.
//!
//! This crate provides:
//! - A low-precision solar position model (declination, equation of time)
//! - The hour-angle solver for a target solar altitude
//! - Dedicated solar-noon (Dhuhr) and shadow-ratio (Asr) formulas
//!
//! Everything here is plain arithmetic on `f64` values: no state, no I/O.

pub mod altitude_types;
pub mod hour_angle;
pub mod solar_position;
pub mod util;

pub use altitude_types::{Crossing, SUNRISE_DEPRESSION_DEG, Side};
pub use hour_angle::{
    asr_altitude_deg, asr_crossing_hours, asr_time, cos_hour_angle, crossing_hours,
    hour_angle_hours, midday, sun_altitude_time, transit_hours,
};
pub use solar_position::{
    SolarPosition, days_since_j2000, declination_deg, ecliptic_longitude_deg,
    mean_anomaly_deg, right_ascension_hours, solar_position,
};
pub use util::normalize_360;
