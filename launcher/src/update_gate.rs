//! Time-gated remote update checks.
//!
//! A scheduled check contacts the release host at most once per
//! `AutoUpdateCheckFrequencyDays`. Every attempt that reaches the host is
//! recorded in `LastUpdateCheck`, including failed ones, so an offline machine
//! is not re-probed on every compile; `vecc update --force` bypasses the gate.

use crate::artefact::download::{RemoteError, ReleaseSource};
use crate::artefact::release::newest;
use crate::config::Configuration;
use crate::version::SemanticVersion;
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, warn};

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Whether the time gate applies to a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Respect the configured check frequency.
    Scheduled,
    /// Contact the host regardless of when it was last contacted.
    Forced,
}

/// What a check found.
#[derive(Debug)]
pub enum CheckResult {
    /// The gate was closed; the host was not contacted.
    Skipped {
        /// When the gate opens again.
        next_check: Option<DateTime<Utc>>,
    },
    /// Nothing newer than the latest installed version is published.
    UpToDate,
    /// A newer version is published.
    Available(SemanticVersion),
    /// The host could not be queried.
    Failed(RemoteError),
}

impl CheckResult {
    /// The newer version, if one was found.
    #[must_use]
    pub fn newer_version(&self) -> Option<SemanticVersion> {
        match self {
            Self::Available(version) => Some(*version),
            _ => None,
        }
    }

    /// Returns true if the host was contacted and the attempt recorded.
    #[must_use]
    pub fn was_attempted(&self) -> bool {
        !matches!(self, Self::Skipped { .. })
    }
}

/// A check outcome together with the configuration it produced.
///
/// When [`CheckResult::was_attempted`] is true the configuration carries a
/// new `LastUpdateCheck` and must be saved.
#[derive(Debug)]
pub struct UpdateCheck {
    /// The configuration after the check.
    pub config: Configuration,
    /// What the check found.
    pub result: CheckResult,
}

/// When the gate next opens, or `None` if no check has been recorded.
#[must_use]
pub fn next_check_at(config: &Configuration) -> Option<DateTime<Utc>> {
    let last = config.last_update_check()?;
    let days = TimeDelta::try_days(i64::from(config.auto_update_check_frequency_days().get()))?;
    last.checked_add_signed(days)
}

/// Returns true if a scheduled check may contact the host at `now`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use vectra_launcher::config::Configuration;
/// use vectra_launcher::update_gate::is_check_due;
///
/// let now = Utc::now();
/// let config = Configuration::default();
/// assert!(is_check_due(&config, now));
///
/// let checked = config.with_update_check_at(now - TimeDelta::days(1));
/// assert!(!is_check_due(&checked, now));
/// ```
#[must_use]
pub fn is_check_due(config: &Configuration, now: DateTime<Utc>) -> bool {
    match (config.last_update_check(), next_check_at(config)) {
        (None, _) => true,
        (Some(_), Some(next)) => now > next,
        // Overflowing the calendar means the gate never reopens.
        (Some(_), None) => false,
    }
}

/// The newest published version, consulted without the gate.
///
/// # Errors
///
/// Returns the [`RemoteError`] from the release source.
pub fn newest_remote(source: &dyn ReleaseSource) -> Result<Option<SemanticVersion>, RemoteError> {
    source.list_releases().map(|releases| newest(&releases))
}

/// Returns `remote` if it is strictly newer than `installed`.
///
/// Nothing installed means any published version is newer.
#[must_use]
pub fn newer_than(
    remote: Option<SemanticVersion>,
    installed: Option<SemanticVersion>,
) -> Option<SemanticVersion> {
    let remote = remote?;
    match installed {
        Some(installed) if remote <= installed => None,
        _ => Some(remote),
    }
}

/// Check for a release newer than the latest installed version.
///
/// Remote failures are not errors here: they are returned as
/// [`CheckResult::Failed`] and the attempt is still recorded.
#[must_use]
pub fn check_for_update(
    config: Configuration,
    source: &dyn ReleaseSource,
    now: DateTime<Utc>,
    mode: CheckMode,
) -> UpdateCheck {
    if mode == CheckMode::Scheduled && !is_check_due(&config, now) {
        debug!("update check skipped; last check at {:?}", config.last_update_check());
        let next_check = next_check_at(&config);
        return UpdateCheck {
            config,
            result: CheckResult::Skipped { next_check },
        };
    }

    let result = match newest_remote(source) {
        Ok(remote) => match newer_than(remote, config.latest_installed_version()) {
            Some(version) => CheckResult::Available(version),
            None => CheckResult::UpToDate,
        },
        Err(error) => {
            warn!("update check failed: {error}");
            CheckResult::Failed(error)
        }
    };
    UpdateCheck {
        config: config.with_update_check_at(now),
        result,
    }
}
