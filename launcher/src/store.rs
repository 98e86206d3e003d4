//! Durable storage for the launcher configuration.
//!
//! The configuration lives at `<root>/config.json`. A missing file yields the
//! default configuration without touching disk. A file that cannot be read or
//! parsed also yields the default, together with a [`CorruptConfig`] warning,
//! so a damaged file never blocks the user. Saves go through a temporary file in the same
//! directory and are renamed over the target.

use crate::config::Configuration;
use crate::error::{LauncherError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use std::io::Write;

/// Non-fatal warning raised when the configuration file could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptConfig {
    /// The file that was ignored.
    pub path: Utf8PathBuf,
    /// Why reading or parsing failed.
    pub reason: String,
}

impl CorruptConfig {
    /// A user-facing warning line.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Warning: configuration file {} is unreadable ({}); using defaults.",
            self.path, self.reason
        )
    }
}

/// The result of loading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// The resolved configuration.
    pub config: Configuration,
    /// Set when the file was unreadable and defaults were substituted.
    pub warning: Option<CorruptConfig>,
}

/// Reads and writes `config.json`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Utf8PathBuf,
}

impl ConfigStore {
    /// Create a store for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configuration file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the configuration, recovering from an unreadable file.
    ///
    /// A read failure (permissions, invalid UTF-8) and a parse failure are
    /// both reported through [`Loaded::warning`] with defaults substituted.
    #[must_use]
    pub fn load(&self) -> Loaded {
        if !self.path.exists() {
            debug!("no configuration at {}; using defaults", self.path);
            return Loaded {
                config: Configuration::default(),
                warning: None,
            };
        }

        let parsed = std::fs::read_to_string(&self.path)
            .map_err(|error| error.to_string())
            .and_then(|content| {
                serde_json::from_str::<Configuration>(&content).map_err(|error| error.to_string())
            });
        match parsed {
            Ok(config) => Loaded {
                config: config.resolved(),
                warning: None,
            },
            Err(reason) => {
                warn!("ignoring unreadable configuration {}: {reason}", self.path);
                Loaded {
                    config: Configuration::default(),
                    warning: Some(CorruptConfig {
                        path: self.path.clone(),
                        reason,
                    }),
                }
            }
        }
    }

    /// Persist `config`, replacing the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ConfigWrite`] if the directory cannot be
    /// created or the file cannot be written.
    pub fn save(&self, config: &Configuration) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Utf8Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| self.write_error(&e))?;

        let json = serde_json::to_string_pretty(config).map_err(|e| self.write_error(&e))?;
        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(|e| self.write_error(&e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .map_err(|e| self.write_error(&e))?;
        file.persist(&self.path)
            .map_err(|e| self.write_error(&e.error))?;
        debug!("saved configuration to {}", self.path);
        Ok(())
    }

    fn write_error(&self, error: &dyn std::fmt::Display) -> LauncherError {
        LauncherError::ConfigWrite {
            path: self.path.clone(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstalledVersion;
    use crate::selector::ActiveVersion;
    use crate::version::SemanticVersion;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        store: ConfigStore,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().join(".vectra")).expect("utf-8 path");
        Fixture {
            store: ConfigStore::new(root.join("config.json")),
            _dir: dir,
        }
    }

    #[rstest]
    fn missing_file_yields_default_without_writing(fixture: Fixture) {
        let loaded = fixture.store.load();
        assert_eq!(loaded.config, Configuration::default());
        assert!(loaded.warning.is_none());
        assert!(!fixture.store.path().exists());
    }

    #[rstest]
    fn save_creates_root_and_round_trips(fixture: Fixture) {
        let config = Configuration::default()
            .with_installed(InstalledVersion::new(SemanticVersion::new(1, 0, 0)))
            .with_active_version(ActiveVersion::Concrete(SemanticVersion::new(1, 0, 0)));
        fixture.store.save(&config).expect("save");

        let loaded = fixture.store.load();
        assert_eq!(loaded.config, config);
        assert!(loaded.warning.is_none());
    }

    #[rstest]
    fn malformed_file_recovers_with_warning(fixture: Fixture) {
        let parent = fixture.store.path().parent().expect("parent");
        std::fs::create_dir_all(parent).expect("create root");
        std::fs::write(fixture.store.path(), "{not valid json").expect("write corrupt file");

        let loaded = fixture.store.load();
        assert_eq!(loaded.config, Configuration::default());
        let warning = loaded.warning.expect("warning");
        assert!(warning.message().contains("using defaults"));
    }

    #[rstest]
    fn undecodable_file_recovers_with_warning(fixture: Fixture) {
        let parent = fixture.store.path().parent().expect("parent");
        std::fs::create_dir_all(parent).expect("create root");
        std::fs::write(fixture.store.path(), [0xff, 0xfe, 0x00, 0x7b]).expect("write bytes");

        let loaded = fixture.store.load();
        assert_eq!(loaded.config, Configuration::default());
        let warning = loaded.warning.expect("warning");
        assert_eq!(warning.path, fixture.store.path());
        assert!(warning.message().contains("using defaults"));
    }

    #[rstest]
    fn save_overwrites_previous_content(fixture: Fixture) {
        let first = Configuration::default()
            .with_installed(InstalledVersion::new(SemanticVersion::new(1, 0, 0)));
        fixture.store.save(&first).expect("first save");
        fixture
            .store
            .save(&Configuration::default())
            .expect("second save");

        let loaded = fixture.store.load();
        assert!(loaded.config.installed_versions().is_empty());
    }

    #[rstest]
    fn save_failure_is_reported(fixture: Fixture) {
        std::fs::create_dir_all(fixture.store.path()).expect("create blocking directory");
        let error = fixture
            .store
            .save(&Configuration::default())
            .expect_err("expected write failure");
        assert!(matches!(error, LauncherError::ConfigWrite { .. }));
    }
}
