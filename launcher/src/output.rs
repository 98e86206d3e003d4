//! User-facing message formatting for the launcher CLI.
//!
//! Status lines go to an injected writer (stderr in production). Writes are
//! best-effort: a closed pipe must never turn a successful command into a
//! failure.

use crate::version::SemanticVersion;
use camino::Utf8Path;
use std::io::Write;

/// Write a line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Write `message` to `stderr` without a newline and flush it, ignoring write
/// failures. Used for questions whose answer is read on the same line.
pub fn write_stderr_prompt(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if write!(stderr, "{message} ").and_then(|()| stderr.flush()).is_err() {
        // Best-effort output; the answer is still read.
    }
}

/// Format the boxed notice printed after a compile when a newer release
/// exists.
///
/// # Examples
///
/// ```
/// use vectra_launcher::output::update_notice;
/// use vectra_launcher::version::SemanticVersion;
///
/// let notice = update_notice(Some(SemanticVersion::new(1, 0, 0)), SemanticVersion::new(1, 1, 0));
/// assert!(notice.contains("|  Update available: 1.0.0 -> 1.1.0  |"));
/// ```
#[must_use]
pub fn update_notice(current: Option<SemanticVersion>, available: SemanticVersion) -> String {
    let current = current.map_or_else(|| "none".to_owned(), |v| v.to_string());
    let update_line = format!("  Update available: {current} -> {available}  ");
    let install_line = "  Run 'vecc update' to install  ";
    let width = update_line.len().max(install_line.len());
    let border = "-".repeat(width);

    format!(
        "+{border}+\n|{update_line:<width$}|\n|{install_line:<width$}|\n+{border}+"
    )
}

/// Instructions for adding the installation root to `PATH` by hand.
#[must_use]
pub fn path_instructions(install_root: &Utf8Path, windows: bool) -> String {
    if windows {
        format!(
            concat!(
                "Add the following directory to your PATH:\n",
                "  {root}\n\n",
                "Or run in PowerShell:\n",
                "  [Environment]::SetEnvironmentVariable(",
                "\"PATH\", \"$env:PATH;{root}\", \"User\")"
            ),
            root = install_root
        )
    } else {
        format!(
            concat!(
                "Add the following to your shell profile (~/.bashrc or ~/.zshrc):\n",
                "  export PATH=\"$PATH:{root}\""
            ),
            root = install_root
        )
    }
}
