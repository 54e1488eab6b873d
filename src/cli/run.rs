use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{check::check, inject::inject, replace::replace, translate::translate},
};

/// Dispatches to the command handler.
///
/// # Returns
/// - `Ok(CommandResult)` with error/warning counts and exit behavior
/// - `Err` if the command fails unexpectedly (unreadable config, I/O errors)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Replace(cmd)) => replace(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Inject(cmd)) => inject(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
