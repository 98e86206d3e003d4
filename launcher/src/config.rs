//! The persisted launcher configuration.
//!
//! [`Configuration`] owns the installed set, the active selector, and the
//! update-check bookkeeping. The derived fields (`LatestInstalledVersion` and
//! `ResolvedActiveVersion`) are written to disk for readers of the file but
//! are never read back: every load and every mutation recomputes them through
//! [`crate::resolver::resolve`]. Mutations consume the configuration and
//! return a freshly resolved one, so a stale derived value cannot be saved.

use crate::layout::VERSIONS_DIRNAME;
use crate::resolver::{Resolution, resolve};
use crate::selector::ActiveVersion;
use crate::version::SemanticVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Default gate period between automatic update checks.
pub const DEFAULT_CHECK_FREQUENCY_DAYS: NonZeroU32 = match NonZeroU32::new(7) {
    Some(days) => days,
    None => NonZeroU32::MIN,
};

/// One installed compiler version and where its payload lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstalledVersion {
    version: String,
    path: String,
}

impl InstalledVersion {
    /// Create an entry for `version` in its standard location under the
    /// installation root.
    #[must_use]
    pub fn new(version: SemanticVersion) -> Self {
        Self {
            version: version.to_string(),
            path: format!("{VERSIONS_DIRNAME}/{version}"),
        }
    }

    /// Create an entry from raw persisted strings.
    #[must_use]
    pub fn from_raw(version: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            path: path.into(),
        }
    }

    /// The version string as persisted.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The payload location relative to the installation root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The version, if the persisted string is well formed.
    #[must_use]
    pub fn parsed_version(&self) -> Option<SemanticVersion> {
        SemanticVersion::parse(&self.version).ok()
    }

    fn is(&self, version: SemanticVersion) -> bool {
        self.parsed_version() == Some(version)
    }
}

/// The launcher's persisted state.
///
/// # Examples
///
/// ```
/// use vectra_launcher::config::{Configuration, InstalledVersion};
/// use vectra_launcher::selector::ActiveVersion;
/// use vectra_launcher::version::SemanticVersion;
///
/// let one = SemanticVersion::new(1, 0, 0);
/// let two = SemanticVersion::new(2, 0, 0);
/// let config = Configuration::default()
///     .with_installed(InstalledVersion::new(one))
///     .with_installed(InstalledVersion::new(two));
/// assert_eq!(config.resolved_active_version(), Some(two));
///
/// let pinned = config.with_active_version(ActiveVersion::Concrete(one));
/// assert_eq!(pinned.resolved_active_version(), Some(one));
/// assert_eq!(pinned.latest_installed_version(), Some(two));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Configuration {
    active_version: ActiveVersion,
    #[serde(skip_deserializing, serialize_with = "optional_version::serialize")]
    resolved_active_version: Option<SemanticVersion>,
    #[serde(skip_deserializing, serialize_with = "optional_version::serialize")]
    latest_installed_version: Option<SemanticVersion>,
    auto_update_check_frequency_days: NonZeroU32,
    #[serde(with = "timestamp")]
    last_update_check: Option<DateTime<Utc>>,
    installed_versions: Vec<InstalledVersion>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            active_version: ActiveVersion::Latest,
            resolved_active_version: None,
            latest_installed_version: None,
            auto_update_check_frequency_days: DEFAULT_CHECK_FREQUENCY_DAYS,
            last_update_check: None,
            installed_versions: Vec::new(),
        }
    }
}

impl Configuration {
    /// The user's active version selector.
    #[must_use]
    pub fn active_version(&self) -> ActiveVersion {
        self.active_version
    }

    /// The concrete version the selector currently points to.
    #[must_use]
    pub fn resolved_active_version(&self) -> Option<SemanticVersion> {
        self.resolved_active_version
    }

    /// The highest installed version.
    #[must_use]
    pub fn latest_installed_version(&self) -> Option<SemanticVersion> {
        self.latest_installed_version
    }

    /// Days between automatic update checks.
    #[must_use]
    pub fn auto_update_check_frequency_days(&self) -> NonZeroU32 {
        self.auto_update_check_frequency_days
    }

    /// When the update gate last performed a remote lookup.
    #[must_use]
    pub fn last_update_check(&self) -> Option<DateTime<Utc>> {
        self.last_update_check
    }

    /// All installed entries.
    #[must_use]
    pub fn installed_versions(&self) -> &[InstalledVersion] {
        &self.installed_versions
    }

    /// Installed versions in descending order, skipping malformed entries.
    #[must_use]
    pub fn installed_descending(&self) -> Vec<SemanticVersion> {
        let mut versions: Vec<_> = self
            .installed_versions
            .iter()
            .filter_map(InstalledVersion::parsed_version)
            .collect();
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions
    }

    /// Returns true if `version` has an entry in the installed set.
    #[must_use]
    pub fn is_installed(&self, version: SemanticVersion) -> bool {
        self.installed_versions.iter().any(|entry| entry.is(version))
    }

    /// Add or replace the entry for the entry's version.
    #[must_use]
    pub fn with_installed(mut self, entry: InstalledVersion) -> Self {
        match entry.parsed_version() {
            Some(version) => self.installed_versions.retain(|existing| !existing.is(version)),
            None => self
                .installed_versions
                .retain(|existing| existing.version != entry.version),
        }
        self.installed_versions.push(entry);
        self.resolved()
    }

    /// Remove the entry for `version`, if present.
    #[must_use]
    pub fn without_installed(mut self, version: SemanticVersion) -> Self {
        self.installed_versions.retain(|entry| !entry.is(version));
        self.resolved()
    }

    /// Replace the active selector.
    #[must_use]
    pub fn with_active_version(mut self, active: ActiveVersion) -> Self {
        self.active_version = active;
        self.resolved()
    }

    /// Replace the update-check period.
    #[must_use]
    pub fn with_check_frequency(mut self, days: NonZeroU32) -> Self {
        self.auto_update_check_frequency_days = days;
        self
    }

    /// Record that a remote update lookup was attempted at `at`.
    #[must_use]
    pub fn with_update_check_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_update_check = Some(at);
        self
    }

    /// Recompute the derived pointers from the installed set and selector.
    #[must_use]
    pub fn resolved(mut self) -> Self {
        let Resolution {
            latest_installed,
            resolved_active,
        } = resolve(&self.installed_versions, self.active_version);
        self.latest_installed_version = latest_installed;
        self.resolved_active_version = resolved_active;
        self
    }
}

/// Serializes an optional version as `"x.y.z"` or the empty string.
mod optional_version {
    use crate::version::SemanticVersion;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &Option<SemanticVersion>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(version) => serializer.collect_str(version),
            None => serializer.serialize_str(""),
        }
    }
}

/// RFC 3339 timestamps; offset-less timestamps are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(at) => serializer.serialize_str(&at.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&text).map(Some).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(text) {
            Ok(at) => Ok(at.with_timezone(&Utc)),
            Err(rfc_error) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Utc.from_utc_datetime(&naive))
                .map_err(|_| rfc_error),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
