use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::errors::ChurnError;
use crate::form::FormId;

use super::context::{CliMode, CommandError, LoopControl, ShellContext};
use super::output;

pub const SCRIPT_ENV: &str = "CHURN_CLIENT_SCRIPT";

pub fn run_cli() -> Result<(), ChurnError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), ChurnError> {
    let mut editor =
        Editor::<CommandHelper, DefaultHistory>::new().map_err(readline_error)?;
    editor.set_helper(Some(CommandHelper::new(context.registry.names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Type `help` to list commands, `show bank` or `show telecom` to begin.");
    while context.running {
        context.collect_finished();
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(readline_error(err)),
        }
    }

    Ok(())
}

/// Runs stdin line by line. The whole script is buffered first so that a
/// confirmation can take its answer from the following line. Pending
/// requests are awaited before returning.
fn run_script(context: &mut ShellContext) -> Result<(), ChurnError> {
    colored::control::set_override(false);
    for line in io::stdin().lock().lines() {
        context.script.push_back(line?);
    }

    while let Some(line) = context.script.pop_front() {
        if !context.running {
            break;
        }
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    context.wait_pending();
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

fn readline_error(err: ReadlineError) -> ChurnError {
    ChurnError::Input(err.to_string())
}

/// Completes command names, then form names or field ids for the commands
/// that take them.
struct CommandHelper {
    commands: Vec<String>,
    arguments: HashMap<&'static str, Vec<String>>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();

        let forms: Vec<String> = FormId::ALL.iter().map(|form| form.as_str().to_string()).collect();
        let mut fields: Vec<String> = FormId::ALL
            .iter()
            .flat_map(|form| form.fields().iter().map(|field| field.id.to_string()))
            .collect();
        fields.sort();
        fields.dedup();

        let mut arguments = HashMap::new();
        for command in ["show", "goto", "fields", "submit", "results"] {
            arguments.insert(command, forms.clone());
        }
        for command in ["set", "clear", "step"] {
            arguments.insert(command, fields.clone());
        }
        arguments.insert("config", vec!["show".to_string(), "set".to_string()]);

        Self {
            commands,
            arguments,
        }
    }

    fn candidates(&self, line: &str, start: usize) -> &[String] {
        let words: Vec<&str> = line[..start].split_whitespace().collect();
        match words.as_slice() {
            [] => self.commands.as_slice(),
            [command] => self
                .arguments
                .get(command.to_ascii_lowercase().as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        let needle = prefix[start..].to_ascii_lowercase();
        let matches = self
            .candidates(line, start)
            .iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
