use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::form::FormId;
use crate::view::lock;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "submit",
            "Validate, confirm and send the visible form (script mode: answer on the next line)",
            "submit [bank|telecom]",
            cmd_submit,
        ),
        CommandEntry::new(
            "results",
            "Show the results region of a form",
            "results [bank|telecom]",
            cmd_results,
        ),
        CommandEntry::new(
            "wait",
            "Wait for pending requests and show their results",
            "wait",
            cmd_wait,
        ),
    ]
}

fn cmd_submit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let form = match context.visible_form_arg(args.first().copied()) {
        Ok(form) => form,
        Err(err) => {
            context.skip_unused_answer();
            return Err(err);
        }
    };
    if context.submit(form)? {
        output::info(format!(
            "{} request sent. Use `wait` or `results` to see the outcome.",
            form.title()
        ));
    }
    Ok(())
}

fn cmd_results(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let forms = match args.first() {
        Some(raw) => vec![context.form_arg(Some(*raw))?],
        None => FormId::ALL.to_vec(),
    };
    let ui = lock(&context.ui);
    let mut shown = false;
    for form in forms {
        if let Some(region) = ui.form(form).results.as_ref().filter(|region| region.visible) {
            output::results(form, region);
            shown = true;
        }
    }
    if !shown {
        output::info("No results yet.");
    }
    Ok(())
}

fn cmd_wait(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.pending_count() == 0 {
        output::info("No pending requests.");
        return Ok(());
    }
    context.wait_pending();
    Ok(())
}
