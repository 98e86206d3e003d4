//! Command orchestration for `vecc`.
//!
//! [`Launcher`] ties the configuration store, the release host, the archive
//! extractor, the compiler runner and the user prompt together. Each command
//! loads the configuration, reports a recovered corrupt file on stderr, and
//! saves whenever it changes persisted state.

use crate::artefact::download::ReleaseSource;
use crate::artefact::extraction::ArchiveExtractor;
use crate::artefact::release::{Release, available_versions, find_release, newest};
use crate::config::{Configuration, InstalledVersion};
use crate::error::{LauncherError, Result};
use crate::layout::InstallLayout;
use crate::list::{local_rows, remote_rows};
use crate::list_output::{format_local, format_remote};
use crate::output::{update_notice, write_stderr_line};
use crate::prebuilt::{PrebuiltRequest, install_prebuilt};
use crate::process::ProcessRunner;
use crate::prompt::Prompt;
use crate::selector::{ActiveVersion, LATEST};
use crate::self_install::{PathSetup, SelfInstallRequest, install_self};
use crate::settings::Setting;
use crate::store::ConfigStore;
use crate::update_gate::{CheckMode, CheckResult, Clock, UpdateCheck, check_for_update, newer_than};
use crate::version::SemanticVersion;
use camino::Utf8Path;
use log::{debug, warn};
use std::ffi::OsString;
use std::io::Write;

/// The collaborators a [`Launcher`] delegates to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Lists releases and downloads assets.
    pub source: &'a dyn ReleaseSource,
    /// Unpacks downloaded archives.
    pub extractor: &'a dyn ArchiveExtractor,
    /// Runs the compiler.
    pub runner: &'a dyn ProcessRunner,
    /// Supplies the current time for update checks.
    pub clock: &'a dyn Clock,
    /// Asks the user to confirm optional installs.
    pub prompt: &'a dyn Prompt,
}

/// What `install` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The version was downloaded and registered.
    Installed {
        /// The installed version.
        version: SemanticVersion,
    },
    /// The version was already present; nothing was downloaded.
    AlreadyInstalled {
        /// The version that was requested.
        version: SemanticVersion,
    },
}

impl InstallOutcome {
    /// The version the outcome concerns.
    #[must_use]
    pub const fn version(self) -> SemanticVersion {
        match self {
            Self::Installed { version } | Self::AlreadyInstalled { version } => version,
        }
    }
}

/// Where a self installation gets its inputs.
#[derive(Debug, Clone, Copy)]
pub struct SelfInstallSource<'a> {
    /// The running launcher executable.
    pub current_exe: &'a Utf8Path,
    /// The user's home directory, if known.
    pub home: Option<&'a Utf8Path>,
    /// The `SHELL` environment value, if set.
    pub shell: Option<&'a str>,
}

/// Runs launcher commands against one installation root.
pub struct Launcher<'a> {
    layout: InstallLayout,
    store: ConfigStore,
    collaborators: Collaborators<'a>,
    quiet: bool,
}

impl<'a> Launcher<'a> {
    /// Create a launcher for `layout`.
    #[must_use]
    pub fn new(layout: InstallLayout, collaborators: Collaborators<'a>) -> Self {
        let store = ConfigStore::new(layout.config_path());
        Self {
            layout,
            store,
            collaborators,
            quiet: false,
        }
    }

    /// Suppress download and extraction progress.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The installation layout.
    #[must_use]
    pub const fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Load the configuration, reporting a recovered unreadable file.
    #[must_use]
    pub fn load(&self, stderr: &mut dyn Write) -> Configuration {
        let loaded = self.store.load();
        if let Some(warning) = loaded.warning {
            write_stderr_line(stderr, warning.message());
        }
        loaded.config
    }

    /// `vecc install <version|latest>`.
    ///
    /// # Errors
    ///
    /// - [`LauncherError::InvalidVersionFormat`] for a malformed argument.
    /// - [`LauncherError::ReleaseNotFound`] if no release carries the version.
    /// - [`LauncherError::RemoteUnavailable`] if the host cannot be queried.
    /// - Any installation or configuration write failure.
    pub fn install(&self, target: &str, stderr: &mut dyn Write) -> Result<InstallOutcome> {
        let selector: ActiveVersion = target.parse()?;
        let config = self.load(stderr);
        let (_, outcome) = match selector {
            ActiveVersion::Latest => {
                let releases = self.collaborators.source.list_releases()?;
                let version = newest(&releases).ok_or_else(|| LauncherError::ReleaseNotFound {
                    version: LATEST.to_owned(),
                })?;
                self.install_version(config, version, Some(releases), stderr)?
            }
            ActiveVersion::Concrete(version) => {
                self.install_version(config, version, None, stderr)?
            }
        };
        Ok(outcome)
    }

    /// Install `version` unless its compiler is already on disk.
    ///
    /// A compiler found on disk without a configuration entry is adopted.
    /// `releases` avoids a second listing when the caller already has one.
    fn install_version(
        &self,
        config: Configuration,
        version: SemanticVersion,
        releases: Option<Vec<Release>>,
        stderr: &mut dyn Write,
    ) -> Result<(Configuration, InstallOutcome)> {
        if self.layout.has_compiler(version) {
            let outcome = InstallOutcome::AlreadyInstalled { version };
            if config.is_installed(version) {
                write_stderr_line(stderr, format!("Vectra {version} is already installed."));
                return Ok((config, outcome));
            }
            let config = config.with_installed(InstalledVersion::new(version));
            self.store.save(&config)?;
            write_stderr_line(
                stderr,
                format!("Vectra {version} was already on disk; registered it."),
            );
            return Ok((config, outcome));
        }

        let releases = match releases {
            Some(releases) => releases,
            None => self.collaborators.source.list_releases()?,
        };
        let release =
            find_release(&releases, version).ok_or_else(|| LauncherError::ReleaseNotFound {
                version: version.to_string(),
            })?;

        write_stderr_line(stderr, format!("Installing Vectra {version}..."));
        let request = PrebuiltRequest {
            version,
            release,
            layout: &self.layout,
            quiet: self.quiet,
        };
        install_prebuilt(
            &request,
            self.collaborators.source,
            self.collaborators.extractor,
            stderr,
        )?;

        let config = config.with_installed(InstalledVersion::new(version));
        self.store.save(&config)?;
        write_stderr_line(stderr, format!("Successfully installed Vectra {version}."));
        let follows_latest = config.active_version().is_latest();
        if let Some(active) = config.resolved_active_version().filter(|_| follows_latest) {
            write_stderr_line(stderr, format!("Active version (latest) is now {active}."));
        }
        Ok((config, InstallOutcome::Installed { version }))
    }

    /// `vecc uninstall <version>`.
    ///
    /// # Errors
    ///
    /// - [`LauncherError::InvalidVersionFormat`] for a malformed argument.
    /// - [`LauncherError::NotInstalled`] if the version is not registered.
    /// - [`LauncherError::VersionIsActive`] if it is the resolved active
    ///   version.
    pub fn uninstall(&self, target: &str, stderr: &mut dyn Write) -> Result<()> {
        let version: SemanticVersion = target.parse()?;
        let config = self.load(stderr);
        if !config.is_installed(version) {
            return Err(LauncherError::NotInstalled { version });
        }
        if config.resolved_active_version() == Some(version) {
            return Err(LauncherError::VersionIsActive { version });
        }

        let dir = self.layout.version_dir(version);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        } else {
            debug!("{dir} already absent");
        }
        self.store.save(&config.without_installed(version))?;
        write_stderr_line(stderr, format!("Uninstalled Vectra {version}."));
        Ok(())
    }

    /// `vecc use <version|latest>`; returns the version now resolved.
    ///
    /// # Errors
    ///
    /// - [`LauncherError::InvalidVersionFormat`] for a malformed argument.
    /// - [`LauncherError::NotInstalled`] if a concrete version is missing.
    /// - [`LauncherError::NoActiveVersion`] if `latest` resolves to nothing.
    pub fn use_version(&self, target: &str, stderr: &mut dyn Write) -> Result<SemanticVersion> {
        match target.parse::<ActiveVersion>()? {
            ActiveVersion::Latest => self.use_latest(stderr),
            ActiveVersion::Concrete(version) => {
                let config = self.load(stderr);
                if !config.is_installed(version) {
                    return Err(LauncherError::NotInstalled { version });
                }
                let config = config.with_active_version(ActiveVersion::Concrete(version));
                self.store.save(&config)?;
                write_stderr_line(stderr, format!("Now using Vectra {version}."));
                Ok(version)
            }
        }
    }

    fn use_latest(&self, stderr: &mut dyn Write) -> Result<SemanticVersion> {
        let mut config = self.load(stderr);
        match self.collaborators.source.list_releases() {
            Ok(releases) => {
                let newer = newer_than(newest(&releases), config.latest_installed_version());
                if let Some(newer) = newer {
                    let question = format!("Version {newer} is available. Install it now?");
                    if self.collaborators.prompt.confirm(&question, true) {
                        config = self.install_version(config, newer, Some(releases), stderr)?.0;
                    }
                }
            }
            Err(error) => warn!("could not look for a newer release: {error}"),
        }

        let config = config.with_active_version(ActiveVersion::Latest);
        let active = config
            .resolved_active_version()
            .ok_or(LauncherError::NoActiveVersion)?;
        self.store.save(&config)?;
        write_stderr_line(stderr, format!("Now using latest (Vectra {active})."));
        Ok(active)
    }

    /// `vecc update [--force]`; returns the version installed, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::RemoteUnavailable`] if the check cannot reach
    /// the host, or any installation failure.
    pub fn update(&self, force: bool, stderr: &mut dyn Write) -> Result<Option<SemanticVersion>> {
        let config = self.load(stderr);
        let mode = if force {
            CheckMode::Forced
        } else {
            CheckMode::Scheduled
        };
        let UpdateCheck { config, result } = check_for_update(
            config,
            self.collaborators.source,
            self.collaborators.clock.now(),
            mode,
        );
        if result.was_attempted() {
            self.store.save(&config)?;
        }

        match result {
            CheckResult::Skipped { next_check } => {
                let when = next_check.map_or_else(
                    || "later".to_owned(),
                    |at| format!("after {}", at.format("%Y-%m-%d %H:%M UTC")),
                );
                write_stderr_line(
                    stderr,
                    format!(
                        "No updates available. Next check {when}; run 'vecc update --force' \
                         to check now."
                    ),
                );
                Ok(None)
            }
            CheckResult::UpToDate => {
                write_stderr_line(stderr, "No updates available.");
                Ok(None)
            }
            CheckResult::Failed(error) => Err(error.into()),
            CheckResult::Available(version) => {
                write_stderr_line(stderr, format!("Updating to version: {version}"));
                self.install_version(config, version, None, stderr)?;
                write_stderr_line(stderr, "Update complete.");
                Ok(Some(version))
            }
        }
    }

    /// Run the active compiler with `args` and return its exit code.
    ///
    /// After the compiler exits a scheduled update check runs; a newer
    /// release is announced on stderr. The check never affects the exit code.
    ///
    /// # Errors
    ///
    /// - [`LauncherError::NoActiveVersion`] if no installed compiler resolves.
    /// - [`LauncherError::Process`] if the compiler cannot be started.
    pub fn passthrough(&self, args: &[OsString], stderr: &mut dyn Write) -> Result<i32> {
        let config = self.load(stderr);
        let version = config
            .resolved_active_version()
            .ok_or(LauncherError::NoActiveVersion)?;
        let compiler = self.layout.compiler_path(version);
        if !compiler.is_file() {
            warn!("active version {version} has no compiler at {compiler}");
            return Err(LauncherError::NoActiveVersion);
        }

        let code = self.collaborators.runner.run(&compiler, args)?;
        self.announce_update(config, stderr);
        Ok(code)
    }

    fn announce_update(&self, config: Configuration, stderr: &mut dyn Write) {
        let UpdateCheck { config, result } = check_for_update(
            config,
            self.collaborators.source,
            self.collaborators.clock.now(),
            CheckMode::Scheduled,
        );
        let recorded = if result.was_attempted() {
            self.store.save(&config)
        } else {
            Ok(())
        };
        if let Err(error) = recorded {
            warn!("could not record update check: {error}");
        }
        if let Some(newer) = result.newer_version() {
            write_stderr_line(stderr, "");
            write_stderr_line(
                stderr,
                update_notice(config.latest_installed_version(), newer),
            );
        }
    }

    /// `vecc list [--all] [--local]`; the table goes to `stdout`.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::RemoteUnavailable`] if published versions
    /// cannot be listed, or [`LauncherError::Io`] if `stdout` is closed.
    pub fn list(
        &self,
        all: bool,
        local: bool,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        let config = self.load(stderr);
        let table = if local {
            format_local(
                &local_rows(&config),
                config.active_version(),
                config.resolved_active_version(),
            )
        } else {
            let releases = self.collaborators.source.list_releases()?;
            format_remote(&remote_rows(&available_versions(&releases), &config), all)
        };
        stdout.write_all(table.as_bytes())?;
        Ok(())
    }

    /// `vecc config <setting> <value>`.
    ///
    /// # Errors
    ///
    /// - [`LauncherError::UnknownSetting`] for an unrecognised setting.
    /// - [`LauncherError::InvalidSetting`] for an invalid value.
    pub fn configure(&self, setting: &str, value: &str, stderr: &mut dyn Write) -> Result<()> {
        let setting: Setting = setting.parse()?;
        let config = setting.apply(self.load(stderr), value)?;
        self.store.save(&config)?;
        write_stderr_line(stderr, format!("Set {setting} to {}.", value.trim()));
        Ok(())
    }

    /// `vecc self install`: install the launcher, arrange `PATH`, then offer
    /// to install the latest compiler.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::SelfInstall`] if the launcher cannot be
    /// placed, or any failure of the optional compiler install.
    pub fn self_install(&self, from: SelfInstallSource<'_>, stderr: &mut dyn Write) -> Result<()> {
        write_stderr_line(stderr, "Installing Vectra launcher...");
        let outcome = install_self(&SelfInstallRequest {
            current_exe: from.current_exe,
            layout: &self.layout,
            home: from.home,
            shell: from.shell,
        })?;

        if outcome.copied {
            write_stderr_line(stderr, format!("Copied launcher to {}.", outcome.launcher));
        }
        let root = self.layout.root();
        match outcome.path {
            PathSetup::AlreadyConfigured { profile } => {
                write_stderr_line(stderr, format!("{root} is already on PATH via {profile}."));
            }
            PathSetup::ProfileUpdated { profile } => {
                write_stderr_line(stderr, format!("Added {root} to PATH in {profile}."));
                write_stderr_line(
                    stderr,
                    format!("Restart your terminal or run 'source {profile}' to use vecc."),
                );
            }
            PathSetup::Manual { instructions } => write_stderr_line(stderr, instructions),
        }

        if self
            .collaborators
            .prompt
            .confirm("Would you like to install the latest compiler version?", true)
        {
            self.install(LATEST, stderr)?;
        }
        write_stderr_line(stderr, "Vectra launcher installed successfully!");
        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
