//! Release listing and asset download from GitHub.
//!
//! Provides a trait-based abstraction over the release host so the launcher
//! can be exercised without network access. The production implementation
//! pages through the GitHub releases API and streams assets to disk with a
//! byte-proportional progress bar.

use crate::artefact::release::{Release, ReleaseAsset};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// The GitHub repository owner/name publishing compiler releases.
const GITHUB_REPO: &str = "DuncanMcPherson/vectra";

/// User agent sent with every request; GitHub rejects anonymous agents.
const USER_AGENT: &str = concat!("vecc/", env!("CARGO_PKG_VERSION"));

/// Releases requested per API page.
const PAGE_SIZE: usize = 100;

/// Upper bound on pages fetched, guarding against a misbehaving server.
const MAX_PAGES: usize = 50;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of published releases and their assets.
///
/// # Examples
///
/// ```
/// use vectra_launcher::artefact::download::GitHubReleaseSource;
///
/// let source = GitHubReleaseSource::new(true);
/// // Use source.list_releases() in production
/// # let _ = source;
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseSource {
    /// List every published release.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the host cannot be reached or answers
    /// with something other than a release list.
    fn list_releases(&self) -> Result<Vec<Release>, RemoteError>;

    /// Download `asset` into the file at `dest`, returning the bytes written.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the download or the file write fails.
    fn download_asset(&self, asset: &ReleaseAsset, dest: &Path) -> Result<u64, RemoteError>;
}

/// Errors arising from the release host.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// HTTP request failed.
    #[error("request failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The response body was not the expected JSON document.
    #[error("unexpected response from {url}: {reason}")]
    Decode {
        /// The URL whose body failed to decode.
        url: String,
        /// The decoding failure.
        reason: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ApiRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<ApiAsset>,
}

#[derive(Debug, Deserialize)]
struct ApiAsset {
    name: String,
    browser_download_url: String,
}

impl From<ApiRelease> for Release {
    fn from(release: ApiRelease) -> Self {
        Self::new(
            release.tag_name,
            release
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    download_url: asset.browser_download_url,
                })
                .collect(),
        )
    }
}

/// Release source backed by the GitHub REST API, using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubReleaseSource {
    quiet: bool,
}

impl GitHubReleaseSource {
    /// Create a source; `quiet` hides the download progress bar.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// The API URL for one page of releases.
    ///
    /// # Examples
    ///
    /// ```
    /// use vectra_launcher::artefact::download::GitHubReleaseSource;
    ///
    /// let url = GitHubReleaseSource::releases_url(2);
    /// assert!(url.contains("/releases?"));
    /// assert!(url.ends_with("page=2"));
    /// ```
    #[must_use]
    pub fn releases_url(page: usize) -> String {
        format!("https://api.github.com/repos/{GITHUB_REPO}/releases?per_page={PAGE_SIZE}&page={page}")
    }
}

impl ReleaseSource for GitHubReleaseSource {
    fn list_releases(&self) -> Result<Vec<Release>, RemoteError> {
        let mut releases = Vec::new();
        for page in 1..=MAX_PAGES {
            let url = Self::releases_url(page);
            let batch = fetch_release_page(&url)?;
            let count = batch.len();
            releases.extend(batch.into_iter().map(Release::from));
            if count < PAGE_SIZE {
                break;
            }
        }
        debug!("listed {} releases from {GITHUB_REPO}", releases.len());
        Ok(releases)
    }

    fn download_asset(&self, asset: &ReleaseAsset, dest: &Path) -> Result<u64, RemoteError> {
        let url = asset.download_url.as_str();
        let response = http_agent()
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/octet-stream")
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;

        let length = response
            .headers()
            .get("content-length")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        let bar = progress_bar(length, self.quiet);

        let mut file = std::fs::File::create(dest)?;
        let mut reader = bar.wrap_read(response.into_body().into_reader());
        let written = std::io::copy(&mut reader, &mut file)?;
        bar.finish_and_clear();
        debug!("downloaded {written} bytes from {url}");
        Ok(written)
    }
}

fn fetch_release_page(url: &str) -> Result<Vec<ApiRelease>, RemoteError> {
    let response = http_agent()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json")
        .call()
        .map_err(|e| map_ureq_error(url, &e))?;
    let body = response
        .into_body()
        .read_to_string()
        .map_err(|e| RemoteError::HttpError {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
    serde_json::from_str(&body).map_err(|e| RemoteError::Decode {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

/// A byte progress bar, hidden when quiet or when the length is unknown.
fn progress_bar(length: Option<u64>, quiet: bool) -> ProgressBar {
    let Some(length) = length.filter(|_| !quiet) else {
        return ProgressBar::hidden();
    };
    let bar = ProgressBar::new(length);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("  [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

/// Shared `ureq` agent with timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .timeout_recv_response(Some(RESPONSE_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`RemoteError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> RemoteError {
    match err {
        ureq::Error::StatusCode(404) => RemoteError::NotFound {
            url: url.to_owned(),
        },
        other => RemoteError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
