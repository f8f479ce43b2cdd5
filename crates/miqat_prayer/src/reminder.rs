//! Reminder instants derived from a computed schedule.
//!
//! Nothing here schedules or delivers anything; a notification layer
//! takes the returned list and arms its own timers.

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use log::{debug, warn};

use crate::schedule_types::{Prayer, PrayerSchedule};

/// A reminder `lead` minutes ahead of one prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub prayer: Prayer,
    pub prayer_time: DateTime<FixedOffset>,
    pub remind_at: DateTime<FixedOffset>,
}

/// Reminders for `prayers`, each `lead_minutes` before the prayer.
///
/// Unresolved prayers are skipped, as are reminders whose instant is not
/// strictly after `now`. The result follows the order of `prayers`.
pub fn plan_reminders<Tz: TimeZone>(
    schedule: &PrayerSchedule,
    prayers: &[Prayer],
    lead_minutes: u32,
    now: &DateTime<Tz>,
) -> Vec<Reminder> {
    let lead = TimeDelta::minutes(i64::from(lead_minutes));
    let now_utc = now.naive_utc();
    prayers
        .iter()
        .filter_map(|&prayer| match schedule.get(prayer) {
            Ok(prayer_time) => Some(Reminder {
                prayer,
                prayer_time,
                remind_at: prayer_time - lead,
            }),
            Err(reason) => {
                warn!("no reminder for {prayer} on {}: {reason}", schedule.date);
                None
            }
        })
        .filter(|r| {
            let upcoming = r.remind_at.naive_utc() > now_utc;
            if !upcoming {
                debug!("reminder for {} at {} already passed", r.prayer, r.remind_at);
            }
            upcoming
        })
        .collect()
}
