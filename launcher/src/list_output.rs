//! Output formatting for version listing.

use crate::list::{DEFAULT_VERSION_LIMIT, VersionRow};
use crate::selector::ActiveVersion;
use crate::version::SemanticVersion;

const TABLE_HEADER: &str = "Version    Status\n---------  --------------------\n";

/// Format published versions, truncated to [`DEFAULT_VERSION_LIMIT`] rows
/// unless `show_all` is set.
///
/// # Examples
///
/// ```
/// use vectra_launcher::list_output::format_remote;
///
/// let output = format_remote(&[], false);
/// assert!(output.contains("No published versions"));
/// ```
#[must_use]
pub fn format_remote(rows: &[VersionRow], show_all: bool) -> String {
    if rows.is_empty() {
        return String::from("No published versions found.\n");
    }

    let mut output = String::from("Available Vectra Compiler Versions:\n\n");
    output.push_str(TABLE_HEADER);
    let shown = if show_all {
        rows
    } else {
        rows.get(..DEFAULT_VERSION_LIMIT).unwrap_or(rows)
    };
    push_rows(&mut output, shown);

    if shown.len() < rows.len() {
        output.push_str(&format!(
            "\nShowing {DEFAULT_VERSION_LIMIT} most recent versions. \
             Use 'vecc list --all' to see all available versions.\n"
        ));
    }
    output
}

/// Format installed versions with the active selector.
///
/// # Examples
///
/// ```
/// use vectra_launcher::list_output::format_local;
/// use vectra_launcher::selector::ActiveVersion;
///
/// let output = format_local(&[], ActiveVersion::Latest, None);
/// assert!(output.contains("vecc install latest"));
/// ```
#[must_use]
pub fn format_local(
    rows: &[VersionRow],
    selector: ActiveVersion,
    resolved: Option<SemanticVersion>,
) -> String {
    if rows.is_empty() {
        return String::from(
            "No versions installed.\n\nRun 'vecc install latest' to get started.\n",
        );
    }

    let mut output = String::from("Installed Vectra Compiler Versions:\n\n");
    output.push_str(TABLE_HEADER);
    push_rows(&mut output, rows);

    let active = match (selector, resolved) {
        (ActiveVersion::Latest, Some(version)) => format!("latest -> {version}"),
        _ => selector.to_string(),
    };
    output.push_str(&format!("\nActive version: {active}\n"));
    output
}

fn push_rows(output: &mut String, rows: &[VersionRow]) {
    for row in rows {
        output.push_str(&format!("{:<10} {}\n", row.version.to_string(), row.status));
    }
}
