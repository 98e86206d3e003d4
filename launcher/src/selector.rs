//! The active version selector chosen by `vecc use`.
//!
//! The selector is either the symbolic `latest` or a concrete version. It is
//! persisted as the string `"latest"` or `"x.y.z"` and converted only at the
//! serialization boundary.

use crate::version::{InvalidFormat, SemanticVersion};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The persisted token for [`ActiveVersion::Latest`].
pub const LATEST: &str = "latest";

/// The user's active version selector.
///
/// # Examples
///
/// ```
/// use vectra_launcher::selector::ActiveVersion;
/// use vectra_launcher::version::SemanticVersion;
///
/// let latest: ActiveVersion = "Latest".parse().expect("valid selector");
/// assert_eq!(latest, ActiveVersion::Latest);
///
/// let pinned: ActiveVersion = "1.4.0".parse().expect("valid selector");
/// assert_eq!(pinned, ActiveVersion::Concrete(SemanticVersion::new(1, 4, 0)));
/// assert_eq!(pinned.to_string(), "1.4.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveVersion {
    /// Follow the highest installed version.
    #[default]
    Latest,
    /// Pin a specific version.
    Concrete(SemanticVersion),
}

impl ActiveVersion {
    /// Returns true for the symbolic `latest` selector.
    #[must_use]
    pub const fn is_latest(&self) -> bool {
        matches!(self, Self::Latest)
    }
}

impl FromStr for ActiveVersion {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(LATEST) {
            return Ok(Self::Latest);
        }
        SemanticVersion::parse(s).map(Self::Concrete)
    }
}

impl fmt::Display for ActiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Concrete(version) => write!(f, "{version}"),
        }
    }
}

impl Serialize for ActiveVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActiveVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
