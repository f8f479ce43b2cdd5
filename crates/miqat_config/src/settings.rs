//! Persisted calculation preferences.
//!
//! Every section and key is optional; anything missing takes the engine
//! default. Enumerations accept either their name or the legacy integer
//! code stored by older installs.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use miqat_prayer::{
    AsrConvention, CalculationMethod, HighLatitudeRule, Prayer, PrayerConfig, TimeAdjustments,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An enumeration given by name or by legacy integer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    Code(i64),
    Name(String),
}

impl Selector {
    fn named(name: &str) -> Self {
        Self::Name(name.to_owned())
    }

    fn resolve<T>(
        &self,
        kind: &'static str,
        from_code: impl FnOnce(i64) -> Option<T>,
    ) -> Result<T, ConfigError>
    where
        T: FromStr<Err = miqat_prayer::UnknownVariant>,
    {
        match self {
            Self::Code(code) => from_code(*code).ok_or(ConfigError::UnknownCode { kind, code: *code }),
            Self::Name(name) => Ok(name.parse()?),
        }
    }
}

/// `[calculation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    pub method: Selector,
    pub asr: Selector,
    pub high_latitude: Selector,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            method: Selector::named(CalculationMethod::default().slug()),
            asr: Selector::named(AsrConvention::default().slug()),
            high_latitude: Selector::named(HighLatitudeRule::default().slug()),
        }
    }
}

/// `[reminders]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Minutes before each prayer.
    pub lead_minutes: u32,
    /// Prayers that get a reminder.
    pub prayers: Vec<Prayer>,
}

fn default_lead_minutes() -> u32 {
    15
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            lead_minutes: default_lead_minutes(),
            prayers: vec![
                Prayer::Fajr,
                Prayer::Dhuhr,
                Prayer::Asr,
                Prayer::Maghrib,
                Prayer::Isha,
            ],
        }
    }
}

/// The whole settings file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub calculation: CalculationSettings,
    pub adjustments: TimeAdjustments,
    pub reminders: ReminderSettings,
}

impl Settings {
    /// Parse settings from TOML text and check every selector resolves.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.prayer_config()?;
        Ok(settings)
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded settings from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Write the settings to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn method(&self) -> Result<CalculationMethod, ConfigError> {
        self.calculation
            .method
            .resolve("method", CalculationMethod::from_code)
    }

    pub fn asr_convention(&self) -> Result<AsrConvention, ConfigError> {
        self.calculation
            .asr
            .resolve("asr convention", AsrConvention::from_code)
    }

    pub fn high_latitude_rule(&self) -> Result<HighLatitudeRule, ConfigError> {
        self.calculation
            .high_latitude
            .resolve("high-latitude rule", HighLatitudeRule::from_code)
    }

    /// Engine configuration described by these settings.
    pub fn prayer_config(&self) -> Result<PrayerConfig, ConfigError> {
        Ok(PrayerConfig {
            method: self.method()?,
            asr_convention: self.asr_convention()?,
            high_latitude_rule: self.high_latitude_rule()?,
            adjustments: self.adjustments,
        })
    }
}

impl From<&PrayerConfig> for Settings {
    fn from(config: &PrayerConfig) -> Self {
        Self {
            calculation: CalculationSettings {
                method: Selector::named(config.method.slug()),
                asr: Selector::named(config.asr_convention.slug()),
                high_latitude: Selector::named(config.high_latitude_rule.slug()),
            },
            adjustments: config.adjustments,
            reminders: ReminderSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let s = Settings::from_toml_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.prayer_config().unwrap(), PrayerConfig::default());
        assert_eq!(s.reminders.lead_minutes, 15);
        assert_eq!(s.reminders.prayers.len(), 5);
    }

    #[test]
    fn names_and_codes() {
        let s = Settings::from_toml_str(
            r#"
            [calculation]
            method = 3
            asr = "hanafi"
            high_latitude = "seventh-of-night"
            "#,
        )
        .unwrap();
        let c = s.prayer_config().unwrap();
        assert_eq!(c.method, CalculationMethod::Makkah);
        assert_eq!(c.asr_convention, AsrConvention::Hanafi);
        assert_eq!(c.high_latitude_rule, HighLatitudeRule::SeventhOfNight);
    }

    #[test]
    fn legacy_codes_everywhere() {
        let s = Settings::from_toml_str(
            "[calculation]\nmethod = 5\nasr = 1\nhigh_latitude = 3\n",
        )
        .unwrap();
        assert_eq!(s.method().unwrap(), CalculationMethod::Tehran);
        assert_eq!(s.asr_convention().unwrap(), AsrConvention::Hanafi);
        assert_eq!(s.high_latitude_rule().unwrap(), HighLatitudeRule::AngleBased);
    }

    #[test]
    fn partial_adjustments() {
        let s = Settings::from_toml_str("[adjustments]\nfajr = 2\nisha = -3\n").unwrap();
        assert_eq!(s.adjustments.fajr, 2);
        assert_eq!(s.adjustments.isha, -3);
        assert_eq!(s.adjustments.dhuhr, 0);
    }

    #[test]
    fn unknown_code_rejected() {
        let err = Settings::from_toml_str("[calculation]\nmethod = 9\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownCode {
                kind: "method",
                code: 9
            }
        ));
    }

    #[test]
    fn unknown_name_rejected() {
        let err = Settings::from_toml_str("[calculation]\nasr = \"maliki\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownName(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = Settings::from_toml_str("[calculation\nmethod = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reminder_prayers_by_name() {
        let s = Settings::from_toml_str(
            "[reminders]\nlead_minutes = 5\nprayers = [\"maghrib\", \"fajr\"]\n",
        )
        .unwrap();
        assert_eq!(s.reminders.lead_minutes, 5);
        assert_eq!(s.reminders.prayers, vec![Prayer::Maghrib, Prayer::Fajr]);
    }

    #[test]
    fn from_config_round_trips() {
        let mut config = PrayerConfig::with_method(CalculationMethod::Jafari);
        config.high_latitude_rule = HighLatitudeRule::MiddleOfNight;
        config.adjustments.maghrib = 1;
        let text = Settings::from(&config).to_toml_string().unwrap();
        let back = Settings::from_toml_str(&text).unwrap();
        assert_eq!(back.prayer_config().unwrap(), config);
    }
}
