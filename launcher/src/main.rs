//! Vectra launcher CLI entrypoint.
//!
//! `vecc` installs and switches between Vectra compiler versions and forwards
//! every command it does not own to the active compiler.

use camino::Utf8PathBuf;
use clap::CommandFactory;
use std::io::Write;
use vectra_launcher::artefact::download::GitHubReleaseSource;
use vectra_launcher::artefact::extraction::ZipExtractor;
use vectra_launcher::artefact::platform::Platform;
use vectra_launcher::cli::{Cli, Command, Invocation, SelfCommand, parse_invocation};
use vectra_launcher::dirs::{BaseDirs, SystemBaseDirs};
use vectra_launcher::error::{LauncherError, Result};
use vectra_launcher::layout::InstallLayout;
use vectra_launcher::orchestrator::{Collaborators, Launcher, SelfInstallSource};
use vectra_launcher::output::write_stderr_line;
use vectra_launcher::process::SystemProcessRunner;
use vectra_launcher::prompt::StdinPrompt;
use vectra_launcher::update_gate::SystemClock;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let mut stderr = std::io::stderr();
    let invocation = match parse_invocation(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => match usage_error_exit_code(&err, &mut stderr) {
            Some(code) => std::process::exit(code),
            None => err.exit(),
        },
    };
    let run_result = run(invocation, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Everything a launcher command needs from the host.
struct Host {
    layout: InstallLayout,
    source: GitHubReleaseSource,
    quiet: bool,
}

impl Host {
    fn discover(quiet: bool) -> Result<Self> {
        let layout = InstallLayout::discover(&SystemBaseDirs, Platform::current()?)?;
        Ok(Self {
            layout,
            source: GitHubReleaseSource::new(quiet),
            quiet,
        })
    }

    fn launcher(&self) -> Launcher<'_> {
        let collaborators = Collaborators {
            source: &self.source,
            extractor: &ZipExtractor,
            runner: &SystemProcessRunner,
            clock: &SystemClock,
            prompt: &StdinPrompt,
        };
        Launcher::new(self.layout.clone(), collaborators).quiet(self.quiet)
    }
}

fn run(invocation: Invocation, stderr: &mut dyn Write) -> Result<i32> {
    match invocation {
        Invocation::Launcher(Cli { command: None, .. }) => {
            Cli::command().print_help()?;
            Ok(0)
        }
        Invocation::Launcher(Cli {
            command: Some(command),
            quiet,
        }) => {
            let host = Host::discover(quiet)?;
            dispatch(&host.launcher(), &command, stderr).map(|()| 0)
        }
        Invocation::Passthrough(args) => Host::discover(false)?
            .launcher()
            .passthrough(&args, stderr),
    }
}

fn dispatch(launcher: &Launcher<'_>, command: &Command, stderr: &mut dyn Write) -> Result<()> {
    match command {
        Command::Install { version } => launcher.install(version, stderr).map(|_| ()),
        Command::Update { force } => launcher.update(*force, stderr).map(|_| ()),
        Command::List { all, local } => {
            let mut stdout = std::io::stdout().lock();
            launcher.list(*all, *local, &mut stdout, stderr)
        }
        Command::Use { version } => launcher.use_version(version, stderr).map(|_| ()),
        Command::Uninstall { version } => launcher.uninstall(version, stderr),
        Command::Config { setting, value } => launcher.configure(setting, value, stderr),
        Command::SelfCommand(SelfCommand::Install) => self_install(launcher, stderr),
    }
}

fn self_install(launcher: &Launcher<'_>, stderr: &mut dyn Write) -> Result<()> {
    let current_exe = Utf8PathBuf::try_from(std::env::current_exe()?).map_err(|err| {
        LauncherError::SelfInstall {
            reason: format!("launcher path is not UTF-8: {}", err.as_path().display()),
        }
    })?;
    let home = SystemBaseDirs
        .home_dir()
        .and_then(|home| Utf8PathBuf::try_from(home).ok());
    let shell = std::env::var("SHELL").ok();
    launcher.self_install(
        SelfInstallSource {
            current_exe: &current_exe,
            home: home.as_deref(),
            shell: shell.as_deref(),
        },
        stderr,
    )
}

/// Usage errors exit with 1 like every other failure; help and version
/// output are left to clap.
fn usage_error_exit_code(err: &clap::Error, stderr: &mut dyn Write) -> Option<i32> {
    if !err.use_stderr() {
        return None;
    }
    write_stderr_line(stderr, err.render().to_string().trim_end());
    Some(1)
}

fn exit_code_for_run_result(result: Result<i32>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
