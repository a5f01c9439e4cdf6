//! Interactive shell over the two forms.

mod commands;
pub mod context;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliMode, CommandError, ShellContext};
pub use shell::run_cli;
