use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::{BASE_URL_ENV, KEYS};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change client settings",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            let mut config = context.config.clone();
            config.set(key, &value)?;
            context.apply_config(config)?;
            output::success(format!("Updated `{key}`."));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}` (expected show or set)"
        ))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for (key, value) in context.config.entries() {
        output::info(format!("  {:<24} {}", key, value));
    }
    let resolved = context.config.resolved_base_url();
    if resolved != context.config.base_url {
        output::hint(format!("{BASE_URL_ENV} overrides base_url: {resolved}"));
    }
    output::info(format!("  Stored at {}", context.config_manager.path().display()));
    Ok(())
}
