//! Error types for the Vectra launcher.
//!
//! This module defines semantic error variants that provide actionable guidance
//! to users when a command fails. Each error includes a recovery hint where one
//! exists. Every variant is converted to exit code `1` at the CLI boundary.

use crate::artefact::download::RemoteError;
use crate::artefact::extraction::ExtractionError;
use crate::version::{InvalidFormat, SemanticVersion};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while running a launcher command.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// A version argument is not of the form `major.minor.patch`.
    #[error("invalid version format '{value}'; expected format: x.y.z")]
    InvalidVersionFormat {
        /// The rejected argument.
        value: String,
    },

    /// The requested version is not installed locally.
    #[error("version {version} is not installed; install it by running 'vecc install {version}'")]
    NotInstalled {
        /// The missing version.
        version: SemanticVersion,
    },

    /// The version cannot be removed because it is the resolved active version.
    #[error(
        "version {version} is currently active; switch to another version first using \
         'vecc use <version|latest>'"
    )]
    VersionIsActive {
        /// The active version.
        version: SemanticVersion,
    },

    /// No installed compiler resolves from the active version selector.
    #[error("no active compiler version set; get started by running 'vecc install latest'")]
    NoActiveVersion,

    /// The release host could not be reached or returned an unusable answer.
    #[error("release service unavailable: {0}")]
    RemoteUnavailable(#[from] RemoteError),

    /// No published release carries the requested version.
    #[error("version {version} not found among published releases")]
    ReleaseNotFound {
        /// The version that was looked up, or `latest`.
        version: String,
    },

    /// The release exists but has no asset for this platform.
    #[error("no release asset named {asset} found for version {version}")]
    AssetNotFound {
        /// The release version.
        version: SemanticVersion,
        /// The expected asset name.
        asset: String,
    },

    /// The host operating system or architecture is not supported.
    #[error("unsupported platform {os}/{arch}; only Windows and Linux x64 are supported")]
    UnsupportedPlatform {
        /// The host operating system.
        os: &'static str,
        /// The host architecture.
        arch: &'static str,
    },

    /// The release archive lacked the platform directory at its top level.
    #[error("expected directory '{identifier}' not found in release archive")]
    MissingPlatformDirectory {
        /// The platform identifier the archive should contain.
        identifier: &'static str,
    },

    /// The archive could not be extracted.
    #[error("archive extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The compiler binary was missing after extraction.
    #[error("installation verification failed: {path} not found")]
    InstallationVerificationFailed {
        /// The expected compiler path.
        path: Utf8PathBuf,
    },

    /// A configuration setting was given an invalid value.
    #[error("invalid value '{value}' for {setting}; please enter a positive integer")]
    InvalidSetting {
        /// The setting name.
        setting: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A configuration setting name is not recognised.
    #[error("unknown setting '{setting}'; available settings: {available}")]
    UnknownSetting {
        /// The rejected setting name.
        setting: String,
        /// Comma-separated list of accepted settings.
        available: String,
    },

    /// The configuration file could not be written.
    #[error("failed to write configuration {path}: {reason}")]
    ConfigWrite {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// The compiler process could not be spawned.
    #[error("failed to run {program}: {source}")]
    Process {
        /// The program that failed to start.
        program: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The launcher could not install itself.
    #[error("self install failed: {reason}")]
    SelfInstall {
        /// Description of the failure.
        reason: String,
    },

    /// The installation root could not be determined.
    #[error("could not determine the installation root; set VECTRA_HOME")]
    MissingInstallRoot,

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`LauncherError`].
pub type Result<T> = std::result::Result<T, LauncherError>;

impl From<InvalidFormat> for LauncherError {
    fn from(error: InvalidFormat) -> Self {
        Self::InvalidVersionFormat { value: error.value }
    }
}
