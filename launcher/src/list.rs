//! Version listing for `vecc list`.
//!
//! Builds one row per version with its local status. Remote listings cover
//! every published version; local listings cover only what is installed.

use crate::config::Configuration;
use crate::version::SemanticVersion;
use std::fmt;

/// Number of versions shown unless `--all` is given.
pub const DEFAULT_VERSION_LIMIT: usize = 10;

/// The local status of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    /// Published but not installed.
    NotInstalled,
    /// Installed but not the resolved active version.
    Installed,
    /// Installed and the resolved active version.
    Active,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotInstalled => "Not Installed",
            Self::Installed => "Installed",
            Self::Active => "Installed (Active)",
        })
    }
}

/// One line of the version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRow {
    /// The version.
    pub version: SemanticVersion,
    /// Its local status.
    pub status: VersionStatus,
}

/// Rows for published versions, in the order given.
///
/// # Examples
///
/// ```
/// use vectra_launcher::config::{Configuration, InstalledVersion};
/// use vectra_launcher::list::{VersionStatus, remote_rows};
/// use vectra_launcher::version::SemanticVersion;
///
/// let one = SemanticVersion::new(1, 0, 0);
/// let two = SemanticVersion::new(2, 0, 0);
/// let config = Configuration::default().with_installed(InstalledVersion::new(one));
/// let rows = remote_rows(&[two, one], &config);
/// assert_eq!(rows[0].status, VersionStatus::NotInstalled);
/// assert_eq!(rows[1].status, VersionStatus::Active);
/// ```
#[must_use]
pub fn remote_rows(available: &[SemanticVersion], config: &Configuration) -> Vec<VersionRow> {
    available
        .iter()
        .map(|&version| VersionRow {
            version,
            status: status_of(version, config),
        })
        .collect()
}

/// Rows for installed versions, newest first.
#[must_use]
pub fn local_rows(config: &Configuration) -> Vec<VersionRow> {
    remote_rows(&config.installed_descending(), config)
}

fn status_of(version: SemanticVersion, config: &Configuration) -> VersionStatus {
    if !config.is_installed(version) {
        VersionStatus::NotInstalled
    } else if config.resolved_active_version() == Some(version) {
        VersionStatus::Active
    } else {
        VersionStatus::Installed
    }
}
