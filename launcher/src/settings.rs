//! User-adjustable settings for `vecc config <setting> <value>`.

use crate::config::Configuration;
use crate::error::{LauncherError, Result};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// A setting that `vecc config` can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Days between automatic update checks.
    CheckDays,
}

impl Setting {
    /// Every supported setting.
    pub const ALL: [Self; 1] = [Self::CheckDays];

    /// The name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CheckDays => "checkdays",
        }
    }

    /// Apply `value` to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::InvalidSetting`] if `value` is not valid for
    /// this setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use vectra_launcher::config::Configuration;
    /// use vectra_launcher::settings::Setting;
    ///
    /// let config = Setting::CheckDays
    ///     .apply(Configuration::default(), "14")
    ///     .expect("valid value");
    /// assert_eq!(config.auto_update_check_frequency_days().get(), 14);
    /// ```
    pub fn apply(self, config: Configuration, value: &str) -> Result<Configuration> {
        match self {
            Self::CheckDays => {
                let days = parse_days(value).ok_or_else(|| LauncherError::InvalidSetting {
                    setting: self.name(),
                    value: value.to_owned(),
                })?;
                Ok(config.with_check_frequency(days))
            }
        }
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(|setting| setting.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Plain decimal digits only; `parse` alone would accept a leading `+`.
fn parse_days(value: &str) -> Option<NonZeroU32> {
    let digits = value.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for Setting {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|setting| setting.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LauncherError::UnknownSetting {
                setting: s.to_owned(),
                available: Self::available(),
            })
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
