//! Version resolution over the installed set.
//!
//! Computes the latest installed version and the concrete version the active
//! selector points to. [`Configuration`](crate::config::Configuration) applies
//! the result after every change to its installed set or selector; nothing
//! else writes the derived fields.

use crate::config::InstalledVersion;
use crate::selector::ActiveVersion;
use crate::version::SemanticVersion;
use log::warn;

/// Derived version pointers for a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// The highest installed version, if any is installed.
    pub latest_installed: Option<SemanticVersion>,
    /// The concrete version the active selector resolves to.
    pub resolved_active: Option<SemanticVersion>,
}

/// Resolve the derived pointers from the installed set and selector.
///
/// Entries whose version fails to parse are skipped.
///
/// # Examples
///
/// ```
/// use vectra_launcher::config::InstalledVersion;
/// use vectra_launcher::resolver::resolve;
/// use vectra_launcher::selector::ActiveVersion;
/// use vectra_launcher::version::SemanticVersion;
///
/// let installed = [
///     InstalledVersion::new(SemanticVersion::new(1, 0, 0)),
///     InstalledVersion::new(SemanticVersion::new(2, 0, 0)),
/// ];
/// let resolution = resolve(&installed, ActiveVersion::Latest);
/// assert_eq!(resolution.resolved_active, Some(SemanticVersion::new(2, 0, 0)));
/// ```
#[must_use]
pub fn resolve(installed: &[InstalledVersion], active: ActiveVersion) -> Resolution {
    let latest_installed = latest_installed(installed);
    let resolved_active = match active {
        ActiveVersion::Latest => latest_installed,
        ActiveVersion::Concrete(version) => Some(version),
    };
    Resolution {
        latest_installed,
        resolved_active,
    }
}

/// Return the highest parseable version in the installed set.
#[must_use]
pub fn latest_installed(installed: &[InstalledVersion]) -> Option<SemanticVersion> {
    installed
        .iter()
        .filter_map(|entry| match entry.parsed_version() {
            Some(version) => Some(version),
            None => {
                warn!(
                    "ignoring installed entry with malformed version '{}'",
                    entry.version()
                );
                None
            }
        })
        .max()
}
