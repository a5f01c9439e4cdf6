use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::form::FormId;
use crate::view::lock;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "status",
            "Show visible form, loading indicators and pending requests",
            "status",
            cmd_status,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Status");
    output::info(format!("  Service      : {}", context.config.resolved_base_url()));
    output::info(format!("  Pending      : {}", context.pending_count()));

    let ui = lock(&context.ui);
    let visible = ui
        .active_form()
        .map_or("none", |form| form.title());
    output::info(format!("  Visible form : {visible}"));
    for form in FormId::ALL {
        let view = ui.form(form);
        let loading = if view.loading { "loading" } else { "idle" };
        let since = view
            .in_flight
            .as_ref()
            .map(|ticket| format!(" since {}", ticket.started_at.format("%H:%M:%S")))
            .unwrap_or_default();
        output::info(format!("  {:<13}: {loading}{since}", form.title()));
        if let Some(region) = view.results.as_ref().filter(|region| region.visible) {
            output::results(form, region);
        }
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
