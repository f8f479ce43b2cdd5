//! Islamic prayer-time schedules.
//!
//! This crate provides:
//! - The calculation method table and the Asr shadow convention
//! - High-latitude fallback rules for Fajr and Isha
//! - The daily schedule assembler producing local `chrono` date-times
//! - Reminder planning over a computed schedule
//!
//! Solar geometry lives in `miqat_solar`; calendar and clock arithmetic in
//! `miqat_time`. Everything is a pure function of its inputs.

pub mod error;
pub mod high_latitude;
pub mod method;
pub mod reminder;
pub mod schedule;
pub mod schedule_types;

pub use error::{PrayerError, UnknownVariant, Unresolved};
pub use high_latitude::{HighLatitudeRule, adjust, night_duration_hours};
pub use method::{AsrConvention, CalculationMethod, IshaRule, MethodParams};
pub use reminder::{Reminder, plan_reminders};
pub use schedule::{
    compute_day_hours, compute_schedule, compute_schedule_for, iftar_time, suhoor_end_time,
};
pub use schedule_types::{
    ALL_PRAYERS, DayHours, GeoTime, Prayer, PrayerConfig, PrayerSchedule, PrayerTime,
    TimeAdjustments,
};
