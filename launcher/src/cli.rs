//! CLI argument definitions for `vecc`.
//!
//! The launcher owns a small set of subcommands. Any other first token is
//! not an error: the whole argument list is forwarded to the active
//! compiler, so routing happens before clap sees the arguments.

use clap::{Parser, Subcommand};
use std::ffi::OsString;

/// Subcommands and flags handled by the launcher itself.
const LAUNCHER_TOKENS: &[&str] = &[
    "install",
    "update",
    "list",
    "use",
    "uninstall",
    "config",
    "self",
    "help",
    "-h",
    "--help",
    "-V",
    "--version",
    "-q",
    "--quiet",
];

/// Manage and launch Vectra compiler versions.
#[derive(Parser, Debug, Default)]
#[command(name = "vecc")]
#[command(version, about)]
#[command(long_about = concat!(
    "Manage and launch Vectra compiler versions.\n\n",
    "vecc installs compiler releases side by side, switches between them, and ",
    "checks for updates. Any command it does not recognise is forwarded ",
    "unchanged to the active compiler.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install the newest release:\n",
    "    $ vecc install latest\n\n",
    "  Pin a specific version:\n",
    "    $ vecc use 1.4.0\n\n",
    "  Check every 14 days instead of 7:\n",
    "    $ vecc config checkdays 14\n\n",
    "  Run the active compiler:\n",
    "    $ vecc build main.vec",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Suppress download and extraction progress.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Launcher subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install a compiler version.
    Install {
        /// A version (x.y.z) or `latest`.
        version: String,
    },

    /// Install the newest release if one is available.
    Update {
        /// Check now, ignoring the update check interval.
        #[arg(long)]
        force: bool,
    },

    /// List compiler versions.
    List {
        /// Show every published version instead of the most recent ten.
        #[arg(long)]
        all: bool,

        /// Show installed versions only; no network access.
        #[arg(long)]
        local: bool,
    },

    /// Select the active compiler version.
    Use {
        /// A version (x.y.z) or `latest`.
        version: String,
    },

    /// Remove an installed compiler version.
    Uninstall {
        /// The version to remove.
        version: String,
    },

    /// Change a launcher setting.
    #[command(after_help = "SETTINGS:\n  checkdays    Days between automatic update checks")]
    Config {
        /// The setting name.
        setting: String,

        /// The new value.
        value: String,
    },

    /// Manage the launcher installation.
    #[command(name = "self", subcommand)]
    SelfCommand(SelfCommand),
}

/// `vecc self` subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfCommand {
    /// Install the launcher and add it to PATH.
    Install,
}

/// How one command line should be handled.
#[derive(Debug)]
pub enum Invocation {
    /// A launcher command.
    Launcher(Cli),
    /// Arguments to forward to the active compiler.
    Passthrough(Vec<OsString>),
}

/// Route a command line, program name included.
///
/// # Errors
///
/// Returns the clap error for a malformed launcher command, including the
/// help and version displays.
///
/// # Examples
///
/// ```
/// use vectra_launcher::cli::{Invocation, parse_invocation};
///
/// let invocation = parse_invocation(["vecc", "build", "main.vec"]).expect("routes");
/// assert!(matches!(invocation, Invocation::Passthrough(args) if args.len() == 2));
/// ```
pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let forwarded = args.get(1).is_some_and(|first| !is_launcher_token(first));
    if forwarded {
        return Ok(Invocation::Passthrough(args.into_iter().skip(1).collect()));
    }
    Cli::try_parse_from(args).map(Invocation::Launcher)
}

fn is_launcher_token(token: &OsString) -> bool {
    token
        .to_str()
        .is_some_and(|token| LAUNCHER_TOKENS.contains(&token))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
