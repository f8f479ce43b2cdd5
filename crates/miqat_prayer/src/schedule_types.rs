//! Input and output types of the schedule assembler.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use miqat_time::{calendar_date, utc_offset};
use serde::{Deserialize, Serialize};

use crate::error::{PrayerError, Unresolved, UnknownVariant};
use crate::high_latitude::HighLatitudeRule;
use crate::method::{AsrConvention, CalculationMethod};

/// The six daily events, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

/// All prayers in the order they occur on an ordinary day.
pub const ALL_PRAYERS: [Prayer; 6] = [
    Prayer::Fajr,
    Prayer::Sunrise,
    Prayer::Dhuhr,
    Prayer::Asr,
    Prayer::Maghrib,
    Prayer::Isha,
];

impl Prayer {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// Zero-based position in [`ALL_PRAYERS`].
    pub const fn index(self) -> usize {
        match self {
            Self::Fajr => 0,
            Self::Sunrise => 1,
            Self::Dhuhr => 2,
            Self::Asr => 3,
            Self::Maghrib => 4,
            Self::Isha => 5,
        }
    }
}

impl Display for Prayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prayer {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        ALL_PRAYERS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| UnknownVariant::new("prayer", s))
    }
}

/// Per-prayer manual corrections in whole minutes (positive = later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeAdjustments {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl TimeAdjustments {
    /// Correction for one prayer, in minutes.
    pub const fn get(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Set the correction for one prayer.
    pub fn set(&mut self, prayer: Prayer, minutes: i32) {
        let slot = match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        };
        *slot = minutes;
    }

    /// Correction for one prayer, in fractional hours.
    pub fn hours(&self, prayer: Prayer) -> f64 {
        f64::from(self.get(prayer)) / 60.0
    }
}

/// Validated observer location, calendar date and timezone.
///
/// Fields are private so a `GeoTime` always holds in-range values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTime {
    latitude_deg: f64,
    longitude_deg: f64,
    timezone_offset_hours: f64,
    offset: FixedOffset,
    date: NaiveDate,
}

impl GeoTime {
    /// Validate and build.
    ///
    /// Latitude must lie in [-90, 90], longitude in [-180, 180], and the
    /// timezone offset within 14 hours of UTC (fractional offsets allowed).
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        timezone_offset_hours: f64,
        date: NaiveDate,
    ) -> Result<Self, PrayerError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(PrayerError::InvalidLatitude(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(PrayerError::InvalidLongitude(longitude_deg));
        }
        let offset = utc_offset(timezone_offset_hours)?;
        Ok(Self {
            latitude_deg,
            longitude_deg,
            timezone_offset_hours,
            offset,
            date,
        })
    }

    /// Like [`GeoTime::new`] with the date given as year, month and day.
    pub fn from_ymd(
        latitude_deg: f64,
        longitude_deg: f64,
        timezone_offset_hours: f64,
        (year, month, day): (i32, u32, u32),
    ) -> Result<Self, PrayerError> {
        let date = calendar_date(year, month, day)?;
        Self::new(latitude_deg, longitude_deg, timezone_offset_hours, date)
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn timezone_offset_hours(&self) -> f64 {
        self.timezone_offset_hours
    }

    /// The timezone as a chrono offset, rounded to whole seconds.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Calculation conventions for one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrayerConfig {
    pub method: CalculationMethod,
    pub asr_convention: AsrConvention,
    pub high_latitude_rule: HighLatitudeRule,
    pub adjustments: TimeAdjustments,
}

impl PrayerConfig {
    /// Default conventions with the given method.
    pub fn with_method(method: CalculationMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

/// The six events as fractional UTC hours from 0h UT on the requested
/// date, after method offsets and manual adjustments but before timezone
/// conversion.
///
/// Values are not wrapped into a day: an event after UTC midnight reads
/// above 24 and one before it reads negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayHours {
    pub fajr: Result<f64, Unresolved>,
    pub sunrise: Result<f64, Unresolved>,
    pub dhuhr: Result<f64, Unresolved>,
    pub asr: Result<f64, Unresolved>,
    pub maghrib: Result<f64, Unresolved>,
    pub isha: Result<f64, Unresolved>,
}

impl DayHours {
    pub fn get(&self, prayer: Prayer) -> Result<f64, Unresolved> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

/// One prayer's local time, or the reason it has none.
pub type PrayerTime = Result<DateTime<FixedOffset>, Unresolved>;

/// Local prayer times for one date.
///
/// Resolved times are instants in the requested offset, laid out around
/// local solar noon of `date`. Isha after local midnight carries the next
/// calendar date and a fallback Fajr before it carries the previous one,
/// so resolved times are strictly increasing whenever every equation has a
/// root. Manual adjustments, or a fallback shorter than the Maghrib offset
/// on a very short night, can still break [`PrayerSchedule::is_ordered`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerSchedule {
    pub date: NaiveDate,
    pub fajr: PrayerTime,
    pub sunrise: PrayerTime,
    pub dhuhr: PrayerTime,
    pub asr: PrayerTime,
    pub maghrib: PrayerTime,
    pub isha: PrayerTime,
}

impl PrayerSchedule {
    pub fn get(&self, prayer: Prayer) -> PrayerTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Fast-breaking time: Maghrib.
    pub fn iftar(&self) -> PrayerTime {
        self.maghrib
    }

    /// End of the pre-dawn meal: Fajr.
    pub fn suhoor_end(&self) -> PrayerTime {
        self.fajr
    }

    /// `(prayer, time)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        ALL_PRAYERS.iter().map(move |&p| (p, self.get(p)))
    }

    /// Whether every prayer has a time.
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, t)| t.is_ok())
    }

    /// Whether the resolved times are strictly increasing in canonical order.
    pub fn is_ordered(&self) -> bool {
        let resolved: Vec<DateTime<FixedOffset>> = self.iter().filter_map(|(_, t)| t.ok()).collect();
        resolved.windows(2).all(|w| w[0] < w[1])
    }

    /// Prayers without a time, with the reason.
    pub fn unresolved(&self) -> Vec<(Prayer, Unresolved)> {
        self.iter()
            .filter_map(|(p, t)| t.err().map(|reason| (p, reason)))
            .collect()
    }

    /// Earliest resolved prayer strictly after `instant`.
    pub fn next_after<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> Option<(Prayer, DateTime<FixedOffset>)> {
        let at = instant.naive_utc();
        self.iter()
            .filter_map(|(p, t)| t.ok().map(|t| (p, t)))
            .filter(|(_, t)| t.naive_utc() > at)
            .min_by_key(|(_, t)| t.naive_utc())
    }
}
