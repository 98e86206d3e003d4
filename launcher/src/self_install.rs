//! `vecc self install`: place the launcher in the installation root and make
//! it reachable on `PATH`.
//!
//! On Unix the root is appended to the profile of the user's shell (zsh,
//! fish, or bash by default) unless the profile already mentions it. On
//! Windows the user is shown instructions instead.

use crate::error::{LauncherError, Result};
use crate::layout::InstallLayout;
use crate::output::path_instructions;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::Write;

/// A login shell whose profile can carry a `PATH` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// Z shell, `~/.zshrc`.
    Zsh,
    /// fish, `~/.config/fish/config.fish`.
    Fish,
    /// Bash, `~/.bashrc`; also the fallback.
    Bash,
}

impl Shell {
    /// Detect the shell from the `SHELL` environment value.
    ///
    /// # Examples
    ///
    /// ```
    /// use vectra_launcher::self_install::Shell;
    ///
    /// assert_eq!(Shell::detect(Some("/usr/bin/fish")), Shell::Fish);
    /// assert_eq!(Shell::detect(None), Shell::Bash);
    /// ```
    #[must_use]
    pub fn detect(shell: Option<&str>) -> Self {
        match shell {
            Some(path) if path.ends_with("zsh") => Self::Zsh,
            Some(path) if path.ends_with("fish") => Self::Fish,
            _ => Self::Bash,
        }
    }

    /// The profile file under `home`.
    #[must_use]
    pub fn profile(self, home: &Utf8Path) -> Utf8PathBuf {
        match self {
            Self::Zsh => home.join(".zshrc"),
            Self::Fish => home.join(".config").join("fish").join("config.fish"),
            Self::Bash => home.join(".bashrc"),
        }
    }

    /// The profile line that adds `root` to `PATH`.
    #[must_use]
    pub fn path_line(self, root: &Utf8Path) -> String {
        match self {
            Self::Fish => format!("fish_add_path \"{root}\""),
            Self::Zsh | Self::Bash => format!("export PATH=\"$PATH:{root}\""),
        }
    }
}

/// Inputs for a self installation.
#[derive(Debug, Clone, Copy)]
pub struct SelfInstallRequest<'a> {
    /// The running launcher executable.
    pub current_exe: &'a Utf8Path,
    /// The installation layout.
    pub layout: &'a InstallLayout,
    /// The user's home directory, if known.
    pub home: Option<&'a Utf8Path>,
    /// The `SHELL` environment value, if set.
    pub shell: Option<&'a str>,
}

/// How `PATH` was arranged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSetup {
    /// The shell profile already mentions the installation root.
    AlreadyConfigured {
        /// The profile that was inspected.
        profile: Utf8PathBuf,
    },
    /// A line was appended to the shell profile.
    ProfileUpdated {
        /// The profile that was changed.
        profile: Utf8PathBuf,
    },
    /// The user must change `PATH` by hand.
    Manual {
        /// Instructions to show.
        instructions: String,
    },
}

/// What a self installation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfInstallOutcome {
    /// Where the launcher now lives.
    pub launcher: Utf8PathBuf,
    /// False when the launcher already ran from the installation root.
    pub copied: bool,
    /// How `PATH` was arranged.
    pub path: PathSetup,
}

/// Copy the launcher into the installation root and arrange `PATH`.
///
/// # Errors
///
/// Returns [`LauncherError::SelfInstall`] if the launcher cannot be copied or
/// the shell profile cannot be updated.
pub fn install_self(request: &SelfInstallRequest<'_>) -> Result<SelfInstallOutcome> {
    let layout = request.layout;
    let target = layout.launcher_path();
    std::fs::create_dir_all(layout.root()).map_err(|e| failure("create installation root", &e))?;

    let copied = if same_file(request.current_exe, &target) {
        debug!("launcher already runs from {target}");
        false
    } else {
        std::fs::copy(request.current_exe, &target)
            .map_err(|e| failure("copy launcher", &e))?;
        true
    };

    let path = if layout.platform().is_windows() {
        PathSetup::Manual {
            instructions: path_instructions(layout.root(), true),
        }
    } else {
        match request.home {
            Some(home) => update_profile(Shell::detect(request.shell), home, layout.root())?,
            None => PathSetup::Manual {
                instructions: path_instructions(layout.root(), false),
            },
        }
    };

    Ok(SelfInstallOutcome {
        launcher: target,
        copied,
        path,
    })
}

/// Append the `PATH` line for `root` to the shell profile unless the profile
/// already mentions `root`.
fn update_profile(shell: Shell, home: &Utf8Path, root: &Utf8Path) -> Result<PathSetup> {
    let profile = shell.profile(home);
    if profile.exists() {
        let contents =
            std::fs::read_to_string(&profile).map_err(|e| failure("read shell profile", &e))?;
        if contents.contains(root.as_str()) {
            return Ok(PathSetup::AlreadyConfigured { profile });
        }
    }

    if let Some(parent) = profile.parent() {
        std::fs::create_dir_all(parent).map_err(|e| failure("create profile directory", &e))?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&profile)
        .map_err(|e| failure("open shell profile", &e))?;
    writeln!(file, "\n# Vectra launcher\n{}", shell.path_line(root))
        .map_err(|e| failure("update shell profile", &e))?;
    Ok(PathSetup::ProfileUpdated { profile })
}

fn same_file(a: &Utf8Path, b: &Utf8Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn failure(action: &str, error: &std::io::Error) -> LauncherError {
    LauncherError::SelfInstall {
        reason: format!("could not {action}: {error}"),
    }
}
