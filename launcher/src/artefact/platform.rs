//! Supported host platforms and their artefact naming.
//!
//! Releases ship one archive per platform, named `vectra-<identifier>.zip`,
//! whose top-level directory carries the same identifier. Only 64-bit Windows
//! and 64-bit Linux are published; every other host fails before any network
//! access.

use crate::error::{LauncherError, Result};
use std::fmt;

/// A platform with published compiler releases.
///
/// # Examples
///
/// ```
/// use vectra_launcher::artefact::platform::Platform;
///
/// let platform = Platform::detect("linux", "x86_64").expect("supported");
/// assert_eq!(platform.identifier(), "linux-x64");
/// assert_eq!(platform.asset_name(), "vectra-linux-x64.zip");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// 64-bit Windows.
    WinX64,
    /// 64-bit Linux.
    LinuxX64,
}

impl Platform {
    /// Detect the platform the launcher is running on.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::UnsupportedPlatform`] for any host other than
    /// x86-64 Windows or Linux.
    pub fn current() -> Result<Self> {
        Self::detect(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map an operating system and architecture pair to a platform.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::UnsupportedPlatform`] for unsupported pairs.
    pub fn detect(os: &'static str, arch: &'static str) -> Result<Self> {
        match (os, arch) {
            ("windows", "x86_64") => Ok(Self::WinX64),
            ("linux", "x86_64") => Ok(Self::LinuxX64),
            _ => Err(LauncherError::UnsupportedPlatform { os, arch }),
        }
    }

    /// The platform identifier used in asset and directory names.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::WinX64 => "win-x64",
            Self::LinuxX64 => "linux-x64",
        }
    }

    /// The release asset name for this platform.
    #[must_use]
    pub fn asset_name(self) -> String {
        format!("vectra-{}.zip", self.identifier())
    }

    /// File name of the compiler executable inside a version directory.
    #[must_use]
    pub const fn compiler_executable(self) -> &'static str {
        match self {
            Self::WinX64 => "vecc-compiler.exe",
            Self::LinuxX64 => "vecc-compiler",
        }
    }

    /// File name of the launcher executable in the installation root.
    #[must_use]
    pub const fn launcher_executable(self) -> &'static str {
        match self {
            Self::WinX64 => "vecc.exe",
            Self::LinuxX64 => "vecc",
        }
    }

    /// Whether this is a Windows platform.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::WinX64)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::windows("windows", "x86_64", Platform::WinX64)]
    #[case::linux("linux", "x86_64", Platform::LinuxX64)]
    fn detects_supported_hosts(
        #[case] os: &'static str,
        #[case] arch: &'static str,
        #[case] expected: Platform,
    ) {
        assert_eq!(Platform::detect(os, arch).expect("supported"), expected);
    }

    #[rstest]
    #[case::macos("macos", "aarch64")]
    #[case::linux_arm("linux", "aarch64")]
    #[case::windows_x86("windows", "x86")]
    fn rejects_unsupported_hosts(#[case] os: &'static str, #[case] arch: &'static str) {
        let err = Platform::detect(os, arch).expect_err("unsupported");
        assert!(matches!(err, LauncherError::UnsupportedPlatform { .. }));
        assert!(err.to_string().contains(os));
    }

    #[test]
    fn windows_asset_and_executables() {
        let platform = Platform::WinX64;
        assert_eq!(platform.asset_name(), "vectra-win-x64.zip");
        assert_eq!(platform.compiler_executable(), "vecc-compiler.exe");
        assert_eq!(platform.launcher_executable(), "vecc.exe");
        assert!(platform.is_windows());
    }
}
