//! Filesystem layout under the installation root.
//!
//! ```text
//! <root>/
//!   config.json
//!   vecc[.exe]
//!   versions/<x.y.z>/vecc-compiler[.exe]
//! ```

use crate::artefact::platform::Platform;
use crate::dirs::BaseDirs;
use crate::error::{LauncherError, Result};
use crate::version::SemanticVersion;
use camino::{Utf8Path, Utf8PathBuf};

/// Directory name of the installation root inside the base directory.
pub const INSTALL_DIRNAME: &str = ".vectra";

/// Directory holding one subdirectory per installed version.
pub const VERSIONS_DIRNAME: &str = "versions";

/// File name of the persisted configuration.
pub const CONFIG_FILENAME: &str = "config.json";

/// Paths of everything the launcher manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: Utf8PathBuf,
    platform: Platform,
}

impl InstallLayout {
    /// Create a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, platform: Platform) -> Self {
        Self {
            root: root.into(),
            platform,
        }
    }

    /// Resolve the installation root from the user's base directories.
    ///
    /// The override wins; otherwise Windows uses the local application data
    /// directory and every other platform the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::MissingInstallRoot`] when no base directory is
    /// available or it is not valid UTF-8.
    pub fn discover(dirs: &dyn BaseDirs, platform: Platform) -> Result<Self> {
        let root = match dirs.install_root_override() {
            Some(root) => root,
            None => {
                let base = match platform {
                    Platform::WinX64 => dirs.data_local_dir(),
                    Platform::LinuxX64 => dirs.home_dir(),
                };
                base.ok_or(LauncherError::MissingInstallRoot)?
                    .join(INSTALL_DIRNAME)
            }
        };
        let root = Utf8PathBuf::try_from(root).map_err(|_| LauncherError::MissingInstallRoot)?;
        Ok(Self::new(root, platform))
    }

    /// The installation root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The platform the layout names executables for.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The configuration file.
    #[must_use]
    pub fn config_path(&self) -> Utf8PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// The directory holding all installed versions.
    #[must_use]
    pub fn versions_dir(&self) -> Utf8PathBuf {
        self.root.join(VERSIONS_DIRNAME)
    }

    /// The payload directory of one version.
    #[must_use]
    pub fn version_dir(&self, version: SemanticVersion) -> Utf8PathBuf {
        self.versions_dir().join(version.to_string())
    }

    /// The compiler executable of one version.
    #[must_use]
    pub fn compiler_path(&self, version: SemanticVersion) -> Utf8PathBuf {
        self.version_dir(version)
            .join(self.platform.compiler_executable())
    }

    /// Where `self install` places the launcher executable.
    #[must_use]
    pub fn launcher_path(&self) -> Utf8PathBuf {
        self.root.join(self.platform.launcher_executable())
    }

    /// Returns true if the compiler executable of `version` exists.
    #[must_use]
    pub fn has_compiler(&self, version: SemanticVersion) -> bool {
        self.compiler_path(version).is_file()
    }
}
