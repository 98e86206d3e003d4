//! Directory resolution abstraction for platform-specific paths.
//!
//! Production code resolves directories through `directories-next`; tests
//! substitute their own [`BaseDirs`] implementation to keep every file under a
//! temporary directory.

use std::path::PathBuf;

/// Environment variable that overrides the installation root.
pub const INSTALL_ROOT_ENV: &str = "VECTRA_HOME";

/// Source of the base directories the launcher installs into.
pub trait BaseDirs {
    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The per-user local application data directory.
    fn data_local_dir(&self) -> Option<PathBuf>;

    /// An explicit installation root that takes precedence over defaults.
    fn install_root_override(&self) -> Option<PathBuf> {
        None
    }
}

/// Base directories of the current user, honouring [`INSTALL_ROOT_ENV`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn data_local_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    fn install_root_override(&self) -> Option<PathBuf> {
        std::env::var_os(INSTALL_ROOT_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_reads_environment_variable() {
        temp_env::with_var(INSTALL_ROOT_ENV, Some("/opt/vectra"), || {
            assert_eq!(
                SystemBaseDirs.install_root_override(),
                Some(PathBuf::from("/opt/vectra"))
            );
        });
    }

    #[test]
    fn empty_override_is_ignored() {
        temp_env::with_var(INSTALL_ROOT_ENV, Some(""), || {
            assert_eq!(SystemBaseDirs.install_root_override(), None);
        });
    }
}
