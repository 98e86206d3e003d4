//! Running the active compiler.
//!
//! The compiler inherits the launcher's standard streams and working
//! directory. Its exit code is returned unchanged; on Unix a child killed by a
//! signal maps to `128 + signal`, the shell convention.

use crate::error::{LauncherError, Result};
use camino::Utf8Path;
use log::debug;
use std::ffi::OsString;
use std::process::{Command, ExitStatus};

/// Abstraction for spawning the compiler.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Process`] if the program cannot be started.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use vectra_launcher::process::{ProcessRunner, SystemProcessRunner};
    ///
    /// let code = SystemProcessRunner.run(Utf8Path::new("/bin/true"), &[])?;
    /// assert_eq!(code, 0);
    /// # Ok::<(), vectra_launcher::error::LauncherError>(())
    /// ```
    fn run(&self, program: &Utf8Path, args: &[OsString]) -> Result<i32>;
}

/// Spawns processes on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &Utf8Path, args: &[OsString]) -> Result<i32> {
        debug!("running {program} with {} argument(s)", args.len());
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| LauncherError::Process {
                program: program.to_owned(),
                source,
            })?;
        Ok(exit_code(status))
    }
}

/// Map an exit status to a process exit code.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    signal_exit_code(status)
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status.signal().map_or(1, |signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> i32 {
    1
}
