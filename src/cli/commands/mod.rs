mod config;
mod form;
mod submission;
mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(form::definitions())
        .chain(submission::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
