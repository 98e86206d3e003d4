//! Stub collaborators for exercising the launcher without network access,
//! real compilers, or an interactive terminal.

use crate::artefact::download::{ReleaseSource, RemoteError};
use crate::artefact::platform::Platform;
use crate::artefact::release::{Release, ReleaseAsset};
use crate::error::Result;
use crate::process::ProcessRunner;
use crate::prompt::Prompt;
use crate::update_gate::Clock;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, TimeDelta, Utc};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A release source serving a fixed set of releases.
///
/// Downloads produce a real zip archive laid out like a published release:
/// a top-level platform directory holding the compiler executable.
#[derive(Debug)]
pub struct StubReleaseSource {
    platform: Platform,
    releases: Vec<Release>,
    unreachable: bool,
    include_compiler: bool,
    list_calls: Cell<usize>,
    downloads: RefCell<Vec<String>>,
}

impl StubReleaseSource {
    /// Serve one release per tag, each with an asset for `platform`.
    #[must_use]
    pub fn new(platform: Platform, tags: &[&str]) -> Self {
        let releases = tags
            .iter()
            .map(|tag| {
                let asset = ReleaseAsset {
                    name: platform.asset_name(),
                    download_url: format!("stub://releases/{tag}/{}", platform.asset_name()),
                };
                Release::new(*tag, vec![asset])
            })
            .collect();
        Self {
            platform,
            releases,
            unreachable: false,
            include_compiler: true,
            list_calls: Cell::new(0),
            downloads: RefCell::new(Vec::new()),
        }
    }

    /// A source whose every request fails.
    #[must_use]
    pub fn unreachable(platform: Platform) -> Self {
        Self {
            unreachable: true,
            ..Self::new(platform, &[])
        }
    }

    /// Serve archives that lack the compiler executable.
    #[must_use]
    pub fn without_compiler(mut self) -> Self {
        self.include_compiler = false;
        self
    }

    /// Number of times the release list was requested.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    /// Download URLs requested so far, in order.
    #[must_use]
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.borrow().clone()
    }

    fn failure(url: &str) -> RemoteError {
        RemoteError::HttpError {
            url: url.to_owned(),
            reason: "connection refused".to_owned(),
        }
    }

    fn write_archive(&self, dest: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(dest)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        let identifier = self.platform.identifier();
        zip.start_file(format!("{identifier}/README.txt"), options)
            .map_err(std::io::Error::other)?;
        zip.write_all(b"Vectra compiler")?;
        if self.include_compiler {
            zip.start_file(
                format!("{identifier}/{}", self.platform.compiler_executable()),
                options,
            )
            .map_err(std::io::Error::other)?;
            zip.write_all(b"#!/bin/sh\nexit 0\n")?;
        }
        zip.finish().map_err(std::io::Error::other)?;
        Ok(())
    }
}

impl ReleaseSource for StubReleaseSource {
    fn list_releases(&self) -> std::result::Result<Vec<Release>, RemoteError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.unreachable {
            return Err(Self::failure("stub://releases"));
        }
        Ok(self.releases.clone())
    }

    fn download_asset(
        &self,
        asset: &ReleaseAsset,
        dest: &Path,
    ) -> std::result::Result<u64, RemoteError> {
        if self.unreachable {
            return Err(Self::failure(&asset.download_url));
        }
        self.downloads.borrow_mut().push(asset.download_url.clone());
        self.write_archive(dest)?;
        Ok(std::fs::metadata(dest)?.len())
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    /// A clock stopped at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// A prompt that replays scripted answers and records the questions asked.
///
/// Once the script runs out every question receives its default.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
    questions: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    /// Answer questions with `answers`, in order.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            questions: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str, default: bool) -> bool {
        self.questions.borrow_mut().push(question.to_owned());
        self.answers.borrow_mut().pop_front().unwrap_or(default)
    }
}

/// One recorded compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRun {
    /// The executable that would have run.
    pub program: Utf8PathBuf,
    /// The forwarded arguments.
    pub args: Vec<OsString>,
}

/// A process runner that records invocations instead of spawning them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    exit_code: i32,
    runs: RefCell<Vec<RecordedRun>>,
}

impl RecordingRunner {
    /// Report `exit_code` for every invocation.
    #[must_use]
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            runs: RefCell::new(Vec::new()),
        }
    }

    /// Invocations recorded so far.
    #[must_use]
    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.borrow().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, program: &Utf8Path, args: &[OsString]) -> Result<i32> {
        self.runs.borrow_mut().push(RecordedRun {
            program: program.to_owned(),
            args: args.to_vec(),
        });
        Ok(self.exit_code)
    }
}
