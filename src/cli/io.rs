use std::collections::VecDeque;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::warn;

use crate::form::confirm::{ConfirmationSummary, SubmissionInteraction};

use super::context::{CliMode, CommandError};
use super::output;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Reads a scripted yes/no answer. Anything but an explicit yes declines.
pub fn parse_answer(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "ok" | "true"
    )
}

/// Whether a script line is a bare confirmation answer rather than a command.
pub fn is_answer(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "ok" | "true" | "n" | "no" | "false"
    )
}

/// Alerts and confirmations for submissions made from the shell. In script
/// mode the answer is the next script line.
pub struct ShellInteraction<'a> {
    mode: CliMode,
    theme: &'a ColorfulTheme,
    script: &'a mut VecDeque<String>,
}

impl<'a> ShellInteraction<'a> {
    pub fn new(mode: CliMode, theme: &'a ColorfulTheme, script: &'a mut VecDeque<String>) -> Self {
        Self {
            mode,
            theme,
            script,
        }
    }
}

impl SubmissionInteraction for ShellInteraction<'_> {
    fn alert(&mut self, message: &str) {
        output::warning(message);
    }

    fn confirm(&mut self, summary: &ConfirmationSummary) -> bool {
        let mut lines = summary.lines();
        let question = lines.pop().unwrap_or_default();
        for line in &lines {
            output::info(line);
        }

        match self.mode {
            CliMode::Script => {
                let answer = self.script.pop_front().unwrap_or_default();
                output::info(format!("{question} {}", answer.trim()));
                parse_answer(&answer)
            }
            CliMode::Interactive => match confirm_action(self.theme, &question, false) {
                Ok(answer) => answer,
                Err(err) => {
                    warn!(error = %err, "confirmation prompt failed");
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(parse_answer("yes"));
        assert!(parse_answer(" Y "));
        assert!(!parse_answer("no"));
        assert!(!parse_answer(""));
        assert!(!parse_answer("submit"));
    }

    #[test]
    fn answers_are_told_apart_from_commands() {
        assert!(is_answer("yes"));
        assert!(is_answer(" No "));
        assert!(!is_answer("status"));
        assert!(!is_answer("set age 42"));
    }

    #[test]
    fn script_answers_are_consumed_in_order() {
        let theme = ColorfulTheme::default();
        let mut script = VecDeque::from(vec!["yes".to_string(), "status".to_string()]);
        let summary = ConfirmationSummary {
            title: "Customer Information:",
            entries: vec![("Age", "42".to_string())],
        };

        let mut interaction = ShellInteraction::new(CliMode::Script, &theme, &mut script);
        assert!(interaction.confirm(&summary));
        assert_eq!(script.front().map(String::as_str), Some("status"));
    }
}
