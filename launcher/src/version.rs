//! Strict `major.minor.patch` version values.
//!
//! Only three dot-separated non-negative integers are accepted. Pre-release
//! tags, build metadata, signs, whitespace, and missing components are all
//! rejected at construction time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The version string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version format '{value}'; expected format: x.y.z")]
pub struct InvalidFormat {
    /// The rejected input.
    pub value: String,
}

/// A validated `major.minor.patch` version.
///
/// Ordering compares the components numerically, so `1.9.0 < 1.10.0`.
///
/// # Examples
///
/// ```
/// use vectra_launcher::version::SemanticVersion;
///
/// let older: SemanticVersion = "1.9.0".parse().expect("valid version");
/// let newer: SemanticVersion = "1.10.0".parse().expect("valid version");
/// assert!(older < newer);
/// assert_eq!(newer.to_string(), "1.10.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
}

impl SemanticVersion {
    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFormat`] unless `text` is exactly three dot-separated
    /// non-negative integers.
    pub fn parse(text: &str) -> Result<Self, InvalidFormat> {
        let invalid = || InvalidFormat {
            value: text.to_owned(),
        };
        let mut parts = text.split('.');
        let major = parse_component(parts.next()).ok_or_else(invalid)?;
        let minor = parse_component(parts.next()).ok_or_else(invalid)?;
        let patch = parse_component(parts.next()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(major, minor, patch))
    }

    /// Parse a release tag, stripping a single leading `v` if present.
    ///
    /// Returns `None` when the remainder is not a valid version.
    ///
    /// # Examples
    ///
    /// ```
    /// use vectra_launcher::version::SemanticVersion;
    ///
    /// assert_eq!(
    ///     SemanticVersion::from_tag("v1.2.3"),
    ///     Some(SemanticVersion::new(1, 2, 3))
    /// );
    /// assert_eq!(SemanticVersion::from_tag("vv1.2.3"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let trimmed = tag.strip_prefix('v').unwrap_or(tag);
        Self::parse(trimmed).ok()
    }

    /// Return the major component.
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    /// Return the minor component.
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// Return the patch component.
    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.patch
    }
}

fn parse_component(part: Option<&str>) -> Option<u64> {
    let digits = part?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for SemanticVersion {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for SemanticVersion {
    type Error = InvalidFormat;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cmp::Ordering;

    #[rstest]
    #[case::zeros("0.0.0", SemanticVersion::new(0, 0, 0))]
    #[case::typical("1.2.3", SemanticVersion::new(1, 2, 3))]
    #[case::multi_digit("10.20.300", SemanticVersion::new(10, 20, 300))]
    #[case::leading_zero("01.2.3", SemanticVersion::new(1, 2, 3))]
    fn parses_valid_versions(#[case] text: &str, #[case] expected: SemanticVersion) {
        assert_eq!(SemanticVersion::parse(text), Ok(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::two_components("1.2")]
    #[case::four_components("1.2.3.4")]
    #[case::non_numeric("1.x.3")]
    #[case::negative("1.-2.3")]
    #[case::plus_sign("+1.2.3")]
    #[case::empty_component("1..3")]
    #[case::trailing_dot("1.2.3.")]
    #[case::leading_whitespace(" 1.2.3")]
    #[case::trailing_garbage("1.2.3-beta")]
    #[case::tag_prefix("v1.2.3")]
    #[case::latest("latest")]
    #[case::overflow("1.2.99999999999999999999999")]
    fn rejects_malformed_versions(#[case] text: &str) {
        let err = SemanticVersion::parse(text).expect_err("expected parse failure");
        assert_eq!(err.value, text);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for version in [
            SemanticVersion::new(0, 0, 1),
            SemanticVersion::new(3, 14, 159),
            SemanticVersion::new(u64::MAX, 0, 7),
        ] {
            assert_eq!(SemanticVersion::parse(&version.to_string()), Ok(version));
        }
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        let a = SemanticVersion::new(1, 9, 0);
        let b = SemanticVersion::new(1, 10, 0);
        let c = SemanticVersion::new(2, 0, 0);
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[rstest]
    #[case("1.0.0", "1.0.0", Ordering::Equal)]
    #[case("1.0.1", "1.0.0", Ordering::Greater)]
    #[case("1.1.0", "1.0.9", Ordering::Greater)]
    #[case("0.9.9", "1.0.0", Ordering::Less)]
    fn compare_orders_major_minor_patch(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        let left: SemanticVersion = left.parse().expect("valid");
        let right: SemanticVersion = right.parse().expect("valid");
        assert_eq!(left.cmp(&right), expected);
    }

    #[rstest]
    #[case::bare("1.2.3", Some(SemanticVersion::new(1, 2, 3)))]
    #[case::prefixed("v1.2.3", Some(SemanticVersion::new(1, 2, 3)))]
    #[case::double_prefix("vv1.2.3", None)]
    #[case::suffix("v1.2.3-rc1", None)]
    fn from_tag_strips_single_prefix(
        #[case] tag: &str,
        #[case] expected: Option<SemanticVersion>,
    ) {
        assert_eq!(SemanticVersion::from_tag(tag), expected);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&SemanticVersion::new(4, 5, 6)).expect("serialize");
        assert_eq!(json, "\"4.5.6\"");
        let back: SemanticVersion = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, SemanticVersion::new(4, 5, 6));
    }
}
