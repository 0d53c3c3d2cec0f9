use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init, tags::tags},
    exit_status::ExitStatus,
};

/// Dispatch a parsed command line to its command handler.
///
/// `Err` is reserved for failures that stop the command before it produces
/// any output (unreadable input, invalid config). Per-document failures are
/// reported and turn into [`ExitStatus::Failure`].
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Tags(cmd)) => tags(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
