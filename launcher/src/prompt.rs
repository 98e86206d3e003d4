//! Yes/no confirmation prompts.

use crate::output::write_stderr_prompt;
use std::io::{BufRead, Write};

/// Asks the user to confirm an action.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Ask `question`; an empty answer or closed input yields `default`.
    fn confirm(&self, question: &str, default: bool) -> bool;
}

/// Prompts on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str, default: bool) -> bool {
        let mut stderr = std::io::stderr();
        let stdin = std::io::stdin();
        ask(question, default, &mut stdin.lock(), &mut stderr)
    }
}

/// Ask `question` on `output` and read one answer line from `input`.
pub fn ask(question: &str, default: bool, input: &mut dyn BufRead, output: &mut dyn Write) -> bool {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    write_stderr_prompt(output, format_args!("{question} {hint}"));
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => default,
        Ok(_) => parse_answer(&line).unwrap_or(default),
    }
}

/// Interpret an answer; `None` for an empty or unrecognised answer.
fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_takes_default_yes("\n", true, true)]
    #[case::empty_takes_default_no("\n", false, false)]
    #[case::eof_takes_default("", true, true)]
    #[case::explicit_no("n\n", true, false)]
    #[case::explicit_yes("YES\n", false, true)]
    #[case::garbage_takes_default("maybe\n", true, true)]
    fn answers_are_interpreted(#[case] answer: &str, #[case] default: bool, #[case] expected: bool) {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        assert_eq!(ask("Install?", default, &mut input, &mut output), expected);
    }

    #[test]
    fn question_shows_default_hint() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        ask("Version 2.0.0 is available. Install it now?", true, &mut input, &mut output);
        let shown = String::from_utf8(output).expect("utf-8");
        assert_eq!(shown, "Version 2.0.0 is available. Install it now? [Y/n] ");
    }
}
