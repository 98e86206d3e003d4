//! Behaviour tests for the version lifecycle and the update gate.
//!
//! Scenarios drive [`Launcher`] through stub collaborators: releases are
//! served from memory as real zip archives, the clock is fixed, and the
//! compiler is never spawned.

use camino::Utf8PathBuf;
use chrono::{TimeDelta, TimeZone, Utc};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::ffi::OsString;
use tempfile::TempDir;
use vectra_launcher::artefact::extraction::ZipExtractor;
use vectra_launcher::artefact::platform::Platform;
use vectra_launcher::config::Configuration;
use vectra_launcher::error::LauncherError;
use vectra_launcher::layout::InstallLayout;
use vectra_launcher::orchestrator::{Collaborators, Launcher};
use vectra_launcher::store::ConfigStore;
use vectra_launcher::test_support::{
    FixedClock, RecordingRunner, ScriptedPrompt, StubReleaseSource,
};
use vectra_launcher::update_gate::Clock;
use vectra_launcher::version::SemanticVersion;

const PLATFORM: Platform = Platform::LinuxX64;

struct LauncherWorld {
    _temp_dir: TempDir,
    layout: InstallLayout,
    source: StubReleaseSource,
    extractor: ZipExtractor,
    runner: RecordingRunner,
    clock: FixedClock,
    prompt: ScriptedPrompt,
    error: Option<LauncherError>,
    exit_code: Option<i32>,
    updated: Option<SemanticVersion>,
    stderr: String,
}

#[fixture]
fn world() -> LauncherWorld {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let root = Utf8PathBuf::try_from(temp_dir.path().join(".vectra")).expect("UTF-8 path");
    let now = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    LauncherWorld {
        _temp_dir: temp_dir,
        layout: InstallLayout::new(root, PLATFORM),
        source: StubReleaseSource::new(PLATFORM, &[]),
        extractor: ZipExtractor,
        runner: RecordingRunner::exiting_with(0),
        clock: FixedClock::new(now),
        prompt: ScriptedPrompt::default(),
        error: None,
        exit_code: None,
        updated: None,
        stderr: String::new(),
    }
}

impl LauncherWorld {
    fn launcher(&self) -> Launcher<'_> {
        Launcher::new(
            self.layout.clone(),
            Collaborators {
                source: &self.source,
                extractor: &self.extractor,
                runner: &self.runner,
                clock: &self.clock,
                prompt: &self.prompt,
            },
        )
        .quiet(true)
    }

    fn record<T>(
        &mut self,
        command: impl FnOnce(&Launcher<'_>, &mut Vec<u8>) -> vectra_launcher::error::Result<T>,
    ) -> Option<T> {
        let mut stderr = Vec::new();
        let result = command(&self.launcher(), &mut stderr);
        self.stderr.push_str(&String::from_utf8_lossy(&stderr));
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(error) => {
                self.error = Some(error);
                None
            }
        }
    }

    fn config(&self) -> Configuration {
        ConfigStore::new(self.layout.config_path())
            .load()
            .config
    }
}

fn version(text: &str) -> SemanticVersion {
    text.parse().expect("valid version")
}

fn install(world: &mut LauncherWorld, target: &str) {
    world.record(|launcher, stderr| launcher.install(target, stderr));
}

fn split_args(args: &str) -> Vec<OsString> {
    args.split_whitespace().map(OsString::from).collect()
}

// ---------------------------------------------------------------------------
// Given
// ---------------------------------------------------------------------------

#[given("releases {tags} are published")]
fn given_releases(world: &mut LauncherWorld, tags: String) {
    let tags: Vec<String> = tags
        .split(',')
        .map(|tag| format!("v{}", tag.trim()))
        .collect();
    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
    world.source = StubReleaseSource::new(PLATFORM, &tags);
}

#[given("the release host is unreachable")]
fn given_unreachable_host(world: &mut LauncherWorld) {
    world.source = StubReleaseSource::unreachable(PLATFORM);
}

#[given("version {target} is installed")]
fn given_installed(world: &mut LauncherWorld, target: String) {
    install(world, &target);
    assert!(world.error.is_none(), "install failed: {:?}", world.error);
}

#[given("the compiler exits with code {code:i32}")]
fn given_exit_code(world: &mut LauncherWorld, code: i32) {
    world.runner = RecordingRunner::exiting_with(code);
}

#[given("the last update check was {days:i64} days ago")]
fn given_last_check(world: &mut LauncherWorld, days: i64) {
    let at = world.clock.now() - TimeDelta::days(days);
    let config = world.config().with_update_check_at(at);
    ConfigStore::new(world.layout.config_path())
        .save(&config)
        .expect("save configuration");
}

// ---------------------------------------------------------------------------
// When
// ---------------------------------------------------------------------------

#[when("version {target} is installed")]
fn when_installed(world: &mut LauncherWorld, target: String) {
    install(world, &target);
}

#[when("version {target} is selected")]
fn when_selected(world: &mut LauncherWorld, target: String) {
    world.record(|launcher, stderr| launcher.use_version(&target, stderr));
}

#[when("version {target} is uninstalled")]
fn when_uninstalled(world: &mut LauncherWorld, target: String) {
    world.record(|launcher, stderr| launcher.uninstall(&target, stderr));
}

#[when("the compiler is run with {args}")]
fn when_compiler_run(world: &mut LauncherWorld, args: String) {
    let args = split_args(&args);
    world.exit_code = world.record(|launcher, stderr| launcher.passthrough(&args, stderr));
}

#[when("an update is requested")]
fn when_update(world: &mut LauncherWorld) {
    world.updated = world
        .record(|launcher, stderr| launcher.update(false, stderr))
        .flatten();
}

#[when("a forced update is requested")]
fn when_forced_update(world: &mut LauncherWorld) {
    world.updated = world
        .record(|launcher, stderr| launcher.update(true, stderr))
        .flatten();
}

// ---------------------------------------------------------------------------
// Then
// ---------------------------------------------------------------------------

#[then("the active version resolves to {expected}")]
fn then_active_resolves(world: &mut LauncherWorld, expected: String) {
    assert_eq!(
        world.config().resolved_active_version(),
        Some(version(&expected))
    );
}

#[then("the command succeeds")]
fn then_succeeds(world: &mut LauncherWorld) {
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
}

#[then("the command fails mentioning {text}")]
fn then_fails_mentioning(world: &mut LauncherWorld, text: String) {
    let error = world.error.as_ref().expect("command should fail");
    assert!(
        error.to_string().contains(&text),
        "expected '{text}' in '{error}'"
    );
}

#[then("version {target} is still installed")]
fn then_still_installed(world: &mut LauncherWorld, target: String) {
    let target = version(&target);
    assert!(world.config().is_installed(target));
    assert!(world.layout.has_compiler(target));
}

#[then("version {target} is not installed")]
fn then_not_installed(world: &mut LauncherWorld, target: String) {
    let target = version(&target);
    assert!(!world.config().is_installed(target));
    assert!(!world.layout.version_dir(target).exists());
}

#[then("{count:u64} download was made")]
fn then_download_count(world: &mut LauncherWorld, count: u64) {
    let downloads = u64::try_from(world.source.downloads().len()).expect("count fits");
    assert_eq!(downloads, count);
}

#[then("the launcher returns exit code {code:i32}")]
fn then_exit_code(world: &mut LauncherWorld, code: i32) {
    assert_eq!(world.exit_code, Some(code), "stderr: {}", world.stderr);
}

#[then("the compiler received {args}")]
fn then_compiler_received(world: &mut LauncherWorld, args: String) {
    let runs = world.runner.runs();
    let run = runs.first().expect("compiler should have run");
    assert_eq!(run.args, split_args(&args));
    assert_eq!(run.program, world.layout.compiler_path(version("1.0.0")));
}

#[then("the release host was not contacted")]
fn then_host_not_contacted(world: &mut LauncherWorld) {
    // Installing during setup lists releases once.
    assert_eq!(world.source.list_calls(), 1);
}

#[then("no version was installed by the update")]
fn then_nothing_updated(world: &mut LauncherWorld) {
    assert!(world.error.is_none(), "unexpected error: {:?}", world.error);
    assert_eq!(world.updated, None);
}

#[then("version {target} was installed by the update")]
fn then_updated_to(world: &mut LauncherWorld, target: String) {
    let target = version(&target);
    assert_eq!(world.updated, Some(target), "stderr: {}", world.stderr);
    assert!(world.config().is_installed(target));
    assert!(world.layout.has_compiler(target));
}

#[then("the last update check is now")]
fn then_checked_now(world: &mut LauncherWorld) {
    assert_eq!(world.config().last_update_check(), Some(world.clock.now()));
}

#[then("the update notice mentions {text}")]
fn then_notice_mentions(world: &mut LauncherWorld, text: String) {
    assert!(
        world.stderr.contains(&format!("Update available: {text}")),
        "stderr: {}",
        world.stderr
    );
    assert!(world.stderr.contains("Run 'vecc update' to install"));
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Latest follows the highest installed version"
)]
fn scenario_latest_follows_highest(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "The active version cannot be uninstalled"
)]
fn scenario_active_version_protected(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Uninstalling a version that is not active"
)]
fn scenario_uninstall_inactive(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Installing an installed version downloads nothing"
)]
fn scenario_reinstall_is_noop(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Selecting a version that is not installed"
)]
fn scenario_select_missing_version(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Running the active compiler forwards its exit code"
)]
fn scenario_passthrough_exit_code(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/lifecycle.feature",
    name = "Running with nothing installed"
)]
fn scenario_passthrough_without_install(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/update_gate.feature",
    name = "A check inside the window does not contact the release host"
)]
fn scenario_gate_closed(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/update_gate.feature",
    name = "A check after the window installs the newer release"
)]
fn scenario_gate_open(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/update_gate.feature",
    name = "A forced update ignores the window"
)]
fn scenario_forced_update(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/update_gate.feature",
    name = "A failed check is still recorded"
)]
fn scenario_failed_check_recorded(world: LauncherWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/update_gate.feature",
    name = "Running the compiler announces a newer release"
)]
fn scenario_passthrough_announces_update(world: LauncherWorld) {
    let _ = world;
}
