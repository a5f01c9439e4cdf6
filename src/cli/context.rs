//! Shell state, dispatch and the bridge between the shell thread and the
//! request runtime.

use std::{collections::VecDeque, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use tokio::{runtime::Runtime, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    client::{Delivery, HttpTransport, RequestOrchestrator},
    config::{Config, ConfigManager},
    errors::{ChurnError, SubmissionError},
    form::FormId,
    pipeline,
    view::{lock, FieldError, FormController, SharedUiState, UiState, ViewToggler},
};

use super::commands;
use super::io::{self as cli_io, ShellInteraction};
use super::output;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No form is visible. Use `show bank` or `show telecom` first.")]
    NoActiveForm,
    #[error("The {title} form is not visible. Use `show {name}` first.")]
    FormHidden {
        title: &'static str,
        name: &'static str,
    },
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Core(#[from] ChurnError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub ui: SharedUiState,
    pub toggler: ViewToggler,
    /// Remaining script lines; confirmations consume the next one.
    pub script: VecDeque<String>,
    pub running: bool,
    bank: FormController,
    telecom: FormController,
    orchestrator: RequestOrchestrator<HttpTransport>,
    runtime: Runtime,
    pending: Vec<JoinHandle<Delivery>>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, ChurnError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, ChurnError> {
        let config = config_manager.load()?;
        output::set_preferences((&config).into());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("churn-client-request")
            .enable_all()
            .build()
            .map_err(|err| ChurnError::Runtime(err.to_string()))?;

        let ui = UiState::shared();
        let orchestrator = build_orchestrator(&config, Arc::clone(&ui))?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            ui,
            toggler: ViewToggler,
            script: VecDeque::new(),
            running: true,
            bank: FormController::new(FormId::Bank),
            telecom: FormController::new(FormId::Telecom),
            orchestrator,
            runtime,
            pending: Vec::new(),
        })
    }

    pub fn controller(&self, form: FormId) -> &FormController {
        match form {
            FormId::Bank => &self.bank,
            FormId::Telecom => &self.telecom,
        }
    }

    pub fn controller_mut(&mut self, form: FormId) -> &mut FormController {
        match form {
            FormId::Bank => &mut self.bank,
            FormId::Telecom => &mut self.telecom,
        }
    }

    pub fn active_form(&self) -> Option<FormId> {
        lock(&self.ui).active_form()
    }

    /// Form named by an optional argument, else the visible form.
    pub fn form_arg(&self, arg: Option<&str>) -> Result<FormId, CommandError> {
        match arg {
            Some(raw) => raw.parse().map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "unknown form `{raw}` (expected bank or telecom)"
                ))
            }),
            None => self.active_form().ok_or(CommandError::NoActiveForm),
        }
    }

    /// Like [`form_arg`](Self::form_arg), but the form must be the visible one.
    pub fn visible_form_arg(&self, arg: Option<&str>) -> Result<FormId, CommandError> {
        let form = self.form_arg(arg)?;
        if self.active_form() != Some(form) {
            return Err(CommandError::FormHidden {
                title: form.title(),
                name: form.as_str(),
            });
        }
        Ok(form)
    }

    /// Drops the next script line when it is a bare yes/no answer meant for a
    /// confirmation that never ran.
    pub fn skip_unused_answer(&mut self) {
        if self.mode != CliMode::Script {
            return;
        }
        if let Some(answer) = self.script.pop_front() {
            if cli_io::is_answer(&answer) {
                debug!(answer = answer.trim(), "skipping unused confirmation answer");
            } else {
                self.script.push_front(answer);
            }
        }
    }

    /// Persists a new configuration and rebuilds what depends on it.
    pub fn apply_config(&mut self, config: Config) -> Result<(), ChurnError> {
        self.config_manager.save(&config)?;
        self.orchestrator = build_orchestrator(&config, Arc::clone(&self.ui))?;
        output::set_preferences((&config).into());
        self.config = config;
        Ok(())
    }

    /// Runs the confirmation gates on the shell thread, then hands the
    /// request to the runtime. Returns whether a request was sent.
    pub fn submit(&mut self, form: FormId) -> Result<bool, CommandError> {
        let snapshot = self.controller(form).snapshot();
        let prepared = {
            let mut interaction = ShellInteraction::new(self.mode, &self.theme, &mut self.script);
            pipeline::prepare_submission(&snapshot, &mut interaction)
        };
        let request = match prepared {
            Ok(request) => request,
            Err(SubmissionError::Validation(_)) => {
                self.skip_unused_answer();
                return Ok(false);
            }
            Err(SubmissionError::Aborted) => {
                output::info("Submission cancelled.");
                return Ok(false);
            }
        };

        let ticket = self.orchestrator.begin(form);
        let orchestrator = self.orchestrator.clone();
        let handle = self
            .runtime
            .spawn(async move { orchestrator.complete(ticket, &request).await });
        self.pending.push(handle);
        Ok(true)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Reports submissions that completed since the last call.
    pub fn collect_finished(&mut self) {
        let (finished, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|handle| handle.is_finished());
        self.pending = pending;
        for handle in finished {
            self.settle(handle);
        }
    }

    /// Blocks until every in-flight submission completed.
    pub fn wait_pending(&mut self) {
        for handle in std::mem::take(&mut self.pending) {
            self.settle(handle);
        }
    }

    fn settle(&self, handle: JoinHandle<Delivery>) {
        match self.runtime.block_on(handle) {
            Ok(delivery) => self.announce(&delivery),
            Err(err) => {
                warn!(error = %err, "submission task failed");
                output::error(format!("Submission task failed: {err}"));
            }
        }
    }

    fn announce(&self, delivery: &Delivery) {
        let form = delivery.ticket.form;
        if !delivery.rendered {
            output::info(format!(
                "Ignored a response for an earlier {} submission.",
                form.title()
            ));
            return;
        }
        let ui = lock(&self.ui);
        if let Some(region) = ui.form(form).results.as_ref() {
            output::results(form, region);
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            debug!(command, ?args, "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::hint(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn prompt(&self) -> String {
        let pending = if self.pending.is_empty() { "" } else { "*" };
        match self.active_form() {
            Some(form) => format!("churn[{}]{}> ", form.as_str(), pending),
            None => format!("churn{}> ", pending),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, ChurnError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| ChurnError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

fn build_orchestrator(
    config: &Config,
    ui: SharedUiState,
) -> Result<RequestOrchestrator<HttpTransport>, ChurnError> {
    let transport = HttpTransport::new(config.resolved_base_url(), config.request_timeout())?;
    Ok(RequestOrchestrator::new(Arc::new(transport), ui)
        .with_endpoints(config.endpoints())
        .discard_stale_responses(config.discard_stale_responses))
}

#[cfg(test)]
pub(crate) fn script_context(base: std::path::PathBuf) -> ShellContext {
    let manager = ConfigManager::with_base_dir(base).unwrap();
    ShellContext::with_config_manager(CliMode::Script, manager).unwrap()
}
