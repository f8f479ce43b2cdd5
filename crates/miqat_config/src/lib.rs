//! Persisted prayer-time preferences.
//!
//! Settings live in a small TOML file with `[calculation]`,
//! `[adjustments]` and `[reminders]` sections. [`Settings::prayer_config`]
//! turns them into the engine's [`miqat_prayer::PrayerConfig`].

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{CalculationSettings, ReminderSettings, Selector, Settings};
