//! Published releases and the versions they carry.

use crate::version::SemanticVersion;

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    /// The asset file name.
    pub name: String,
    /// Direct download URL.
    pub download_url: String,
}

/// One published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// The release tag, usually `vX.Y.Z`.
    pub tag: String,
    /// Files attached to the release.
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Create a release from its tag and assets.
    #[must_use]
    pub fn new(tag: impl Into<String>, assets: Vec<ReleaseAsset>) -> Self {
        Self {
            tag: tag.into(),
            assets,
        }
    }

    /// The version the tag names, if it is a valid version.
    #[must_use]
    pub fn version(&self) -> Option<SemanticVersion> {
        SemanticVersion::from_tag(&self.tag)
    }

    /// Find the asset with the given name.
    #[must_use]
    pub fn asset_named(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

/// Versions of all releases with a valid tag, newest first, without
/// duplicates.
///
/// # Examples
///
/// ```
/// use vectra_launcher::artefact::release::{Release, available_versions};
/// use vectra_launcher::version::SemanticVersion;
///
/// let releases = [
///     Release::new("v1.0.0", Vec::new()),
///     Release::new("nightly", Vec::new()),
///     Release::new("1.2.0", Vec::new()),
/// ];
/// assert_eq!(
///     available_versions(&releases),
///     vec![SemanticVersion::new(1, 2, 0), SemanticVersion::new(1, 0, 0)],
/// );
/// ```
#[must_use]
pub fn available_versions(releases: &[Release]) -> Vec<SemanticVersion> {
    let mut versions: Vec<_> = releases.iter().filter_map(Release::version).collect();
    versions.sort_unstable_by(|a, b| b.cmp(a));
    versions.dedup();
    versions
}

/// The highest version among `releases`.
#[must_use]
pub fn newest(releases: &[Release]) -> Option<SemanticVersion> {
    releases.iter().filter_map(Release::version).max()
}

/// The release whose tag names `version`.
#[must_use]
pub fn find_release(releases: &[Release], version: SemanticVersion) -> Option<&Release> {
    releases
        .iter()
        .find(|release| release.version() == Some(version))
}
