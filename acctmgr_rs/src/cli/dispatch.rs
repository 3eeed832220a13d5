//! Dispatcher: runs a parsed [`Command`] against a [`Session`].

use std::io::Write;

use tracing::debug;

use super::command::{Command, Entity};
use crate::confirm::Confirm;
use crate::error::CommandError;
use crate::session::{Outcome, Session};
use crate::store::ClusterStore;

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// A cluster command finished with this outcome.
    Done(Outcome),
    /// Help or version text was written.
    Printed,
    /// Leave interactive mode.
    Quit,
}

/// Run one command.
pub fn dispatch_command<S, C, W>(
    session: &mut Session<S, C, W>,
    cmd: &Command,
) -> Result<DispatchResult, CommandError>
where
    S: ClusterStore,
    C: Confirm,
    W: Write,
{
    debug!(command = cmd.name(), "dispatching");
    let outcome = match cmd {
        Command::Add(Entity::Cluster, tokens) => session.add_cluster(tokens)?,
        Command::List(Entity::Cluster, tokens) => session.list_cluster(tokens)?,
        Command::Modify(Entity::Cluster, tokens) => session.modify_cluster(tokens)?,
        Command::Delete(Entity::Cluster, tokens) => session.delete_cluster(tokens)?,
        Command::Help(Some(verb)) => {
            match Command::format_command_help(verb) {
                Some(text) => write!(session.out, "{text}")?,
                None => {
                    return Err(CommandError::Usage(format!(
                        "Unknown command '{verb}'. Run 'acctmgr help' for available commands."
                    )));
                }
            }
            return Ok(DispatchResult::Printed);
        }
        Command::Help(None) => {
            write!(session.out, "{}", Command::format_help())?;
            return Ok(DispatchResult::Printed);
        }
        Command::Version => {
            writeln!(session.out, "acctmgr {}", env!("CARGO_PKG_VERSION"))?;
            return Ok(DispatchResult::Printed);
        }
        Command::Quit => return Ok(DispatchResult::Quit),
    };
    debug!(?outcome, "command finished");
    Ok(DispatchResult::Done(outcome))
}
