use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::form::{FieldValues, FormId};
use crate::view::{lock, Activation, Adjustment};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("show", "Show a form (button)", "show <bank|telecom>", cmd_show),
        CommandEntry::new(
            "goto",
            "Navigate to a form (link)",
            "goto <bank|telecom>",
            cmd_goto,
        ),
        CommandEntry::new(
            "fields",
            "List the fields and current values of a form",
            "fields [bank|telecom]",
            cmd_fields,
        ),
        CommandEntry::new(
            "set",
            "Set a field of the visible form",
            "set <field> <value>",
            cmd_set,
        ),
        CommandEntry::new(
            "clear",
            "Clear a field of the visible form",
            "clear <field>",
            cmd_clear,
        ),
        CommandEntry::new(
            "step",
            "Step a numeric field within its bounds",
            "step <field> <delta>",
            cmd_step,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    activate(context, args, Activation::Button)
}

fn cmd_goto(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    activate(context, args, Activation::Link)
}

fn activate(context: &mut ShellContext, args: &[&str], activation: Activation) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: show <bank|telecom>".into(),
        ));
    };
    let form = context.form_arg(Some(*raw))?;
    let outcome = {
        let mut ui = lock(&context.ui);
        context.toggler.activate(&mut ui, form, activation)
    };
    output::success(format!("{} form shown.", outcome.shown.title()));
    Ok(())
}

fn cmd_fields(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let form = context.form_arg(args.first().copied())?;
    let controller = context.controller(form);
    output::section(format!("{} fields", form.title()));
    for field in form.fields() {
        let value = controller.values().raw(field.id).unwrap_or("");
        let mut detail = field.kind.describe();
        if let Some(bounds) = field.bounds {
            detail.push_str(&format!(", {bounds}"));
        }
        if !field.required {
            detail.push_str(", optional");
        }
        output::info(format!(
            "  {:<18} {:<26} = {:<16} ({detail})",
            field.id, field.label, value
        ));
    }
    for (id, value) in controller.readouts() {
        output::info(format!("  {:<18} {:<26} = {}", id, "(readout)", value));
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value>".into(),
        ));
    }
    let form = context.form_arg(None)?;
    let value = args[1..].join(" ");
    let before = Before::capture(context, form);
    context.controller_mut(form).set(args[0], &value)?;
    before.report(context, form);
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(field) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: clear <field>".into()));
    };
    let form = context.form_arg(None)?;
    let before = Before::capture(context, form);
    context.controller_mut(form).clear(field)?;
    before.report(context, form);
    Ok(())
}

fn cmd_step(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(field), Some(delta)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "usage: step <field> <delta>".into(),
        ));
    };
    let delta: i64 = delta.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("delta must be a whole number, got `{delta}`"))
    })?;
    let form = context.form_arg(None)?;
    let before = Before::capture(context, form);
    match context.controller_mut(form).adjust(field, delta)? {
        Adjustment::Changed(_) => before.report(context, form),
        Adjustment::Unchanged => {
            let controller = context.controller(form);
            let field = controller.field(field)?;
            let current = controller.values().raw(field.id).unwrap_or("");
            let bounds = field
                .bounds
                .map(|bounds| bounds.to_string())
                .unwrap_or_default();
            output::warning(format!(
                "{} stays at `{current}` (allowed {bounds}).",
                field.label
            ));
        }
    }
    Ok(())
}

/// Values and readouts before an edit, used to echo what the edit changed,
/// including derived fields.
struct Before {
    values: FieldValues,
    readouts: Vec<(&'static str, String)>,
}

impl Before {
    fn capture(context: &ShellContext, form: FormId) -> Self {
        let controller = context.controller(form);
        Self {
            values: controller.values().clone(),
            readouts: readouts(context, form),
        }
    }

    fn report(&self, context: &ShellContext, form: FormId) {
        let controller = context.controller(form);
        for field in form.fields() {
            let old = self.values.raw(field.id);
            let new = controller.values().raw(field.id);
            if old != new {
                output::info(format!("{}: {}", field.label, new.unwrap_or("(empty)")));
            }
        }
        for (id, value) in readouts(context, form) {
            let changed = self
                .readouts
                .iter()
                .all(|(old_id, old)| *old_id != id || *old != value);
            if changed {
                output::info(format!("{id}: {value}"));
            }
        }
    }
}

fn readouts(context: &ShellContext, form: FormId) -> Vec<(&'static str, String)> {
    context
        .controller(form)
        .readouts()
        .map(|(id, value)| (id, value.to_string()))
        .collect()
}
