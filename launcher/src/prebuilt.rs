//! Prebuilt compiler download and installation pipeline.
//!
//! Downloads the platform archive for one release into a staging directory
//! under the installation root, extracts it, moves the contents of its
//! platform directory into `versions/<version>/`, and verifies that the
//! compiler executable arrived. Staging lives on the same filesystem as the
//! destination so the final move is a rename.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use std::io::Write;

use crate::artefact::download::ReleaseSource;
use crate::artefact::extraction::ArchiveExtractor;
use crate::artefact::release::Release;
use crate::error::{LauncherError, Result};
use crate::layout::InstallLayout;
use crate::output::write_stderr_line;
use crate::version::SemanticVersion;

/// Directory name of the extracted archive inside the staging directory.
const EXTRACTED_DIRNAME: &str = "extracted";

/// Parameters for one prebuilt installation.
#[derive(Debug, Clone, Copy)]
pub struct PrebuiltRequest<'a> {
    /// The version being installed.
    pub version: SemanticVersion,
    /// The release that publishes it.
    pub release: &'a Release,
    /// Where the version is installed.
    pub layout: &'a InstallLayout,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// Download and install a release through the given collaborators.
///
/// Returns the installed version directory.
///
/// # Errors
///
/// - [`LauncherError::AssetNotFound`] if the release has no asset for this
///   platform.
/// - [`LauncherError::RemoteUnavailable`] if the download fails.
/// - [`LauncherError::Extraction`] if the archive cannot be unpacked.
/// - [`LauncherError::MissingPlatformDirectory`] if the archive lacks the
///   platform directory.
/// - [`LauncherError::InstallationVerificationFailed`] if the compiler is
///   missing afterwards; the half-populated version directory is removed.
pub fn install_prebuilt(
    request: &PrebuiltRequest<'_>,
    source: &dyn ReleaseSource,
    extractor: &dyn ArchiveExtractor,
    stderr: &mut dyn Write,
) -> Result<Utf8PathBuf> {
    let PrebuiltRequest {
        version,
        release,
        layout,
        quiet,
    } = *request;
    let platform = layout.platform();
    let asset_name = platform.asset_name();
    let asset = release
        .asset_named(&asset_name)
        .ok_or_else(|| LauncherError::AssetNotFound {
            version,
            asset: asset_name.clone(),
        })?;

    std::fs::create_dir_all(layout.root())?;
    let staging = tempfile::Builder::new()
        .prefix(".install-")
        .tempdir_in(layout.root())?;
    let archive_path = staging.path().join(&asset.name);

    if !quiet {
        write_stderr_line(stderr, format!("Downloading {asset_name} ({version})..."));
    }
    let bytes = source.download_asset(asset, &archive_path)?;
    debug!("downloaded {bytes} bytes to {}", archive_path.display());

    if !quiet {
        write_stderr_line(stderr, "Extracting...");
    }
    let extracted = staging.path().join(EXTRACTED_DIRNAME);
    std::fs::create_dir_all(&extracted)?;
    extractor.extract(&archive_path, &extracted)?;

    let platform_dir = extracted.join(platform.identifier());
    if !platform_dir.is_dir() {
        return Err(LauncherError::MissingPlatformDirectory {
            identifier: platform.identifier(),
        });
    }

    let version_dir = layout.version_dir(version);
    move_contents(&platform_dir, &version_dir)?;

    let compiler = layout.compiler_path(version);
    if !compiler.is_file() {
        remove_partial(&version_dir);
        return Err(LauncherError::InstallationVerificationFailed { path: compiler });
    }
    make_executable(&compiler)?;

    if !quiet {
        write_stderr_line(stderr, format!("Installed files to {version_dir}"));
    }
    Ok(version_dir)
}

/// Replace `dest` with the entries of `source`.
fn move_contents(source: &std::path::Path, dest: &Utf8Path) -> Result<()> {
    if dest.exists() {
        debug!("replacing stale version directory {dest}");
        std::fs::remove_dir_all(dest)?;
    }
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        std::fs::rename(entry.path(), dest.as_std_path().join(entry.file_name()))?;
    }
    Ok(())
}

fn remove_partial(version_dir: &Utf8Path) {
    if let Err(error) = std::fs::remove_dir_all(version_dir) {
        warn!("could not remove incomplete install {version_dir}: {error}");
    }
}

#[cfg(unix)]
fn make_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "prebuilt_tests.rs"]
mod tests;
