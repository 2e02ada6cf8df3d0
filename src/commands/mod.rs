//! Command implementations for bar.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command except `completion` resolves a
//! [`Session`]; the grammar itself is only read by commands that need it.

mod build;
mod catalog;
mod check;
mod completion;
mod inspect;
mod parse;
mod shuffle;
mod tokens;

#[cfg(test)]
mod tests;

use crate::cli::{Cli, Command};
use crate::context::Session;
use crate::error::{BarError, Result};
use crate::resolver::{Conflict, ConflictKind};
use serde::Serialize;

pub use build::cmd_build;
pub use catalog::{cmd_patterns, cmd_starters};
pub use check::cmd_check;
pub use completion::{cmd_complete, cmd_completion};
pub use inspect::{cmd_chip, cmd_conflicts};
pub use parse::cmd_parse;
pub use shuffle::cmd_shuffle;
pub use tokens::cmd_tokens;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    let session = || Session::resolve(global.grammar.as_deref(), global.config.as_deref());

    match command {
        Command::Build(args) => cmd_build(&session()?, args),
        Command::Parse(args) => cmd_parse(&session()?, args),
        Command::Tokens(args) => cmd_tokens(&session()?, args),
        Command::Conflicts(args) => cmd_conflicts(&session()?, args),
        Command::Chip(args) => cmd_chip(&session()?, args),
        Command::Patterns(args) => cmd_patterns(&session()?, args),
        Command::Starters(args) => cmd_starters(&session()?, args),
        Command::Check => cmd_check(&session()?),
        Command::Shuffle(args) => cmd_shuffle(&session()?, args),
        Command::Completion(args) => cmd_completion(args),
        Command::Complete(args) => cmd_complete(session(), args),
    }
}

/// Pretty-printed JSON for `--json` output.
fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BarError::UserError(format!("failed to serialize output: {}", e)))
}

/// One-line description of a conflict.
fn describe_conflict(conflict: &Conflict) -> String {
    let pair = format!(
        "'{}' ({}) conflicts with '{}' ({})",
        conflict.token_a, conflict.axis_a, conflict.token_b, conflict.axis_b
    );
    match &conflict.kind {
        ConflictKind::Incompatibility => pair,
        ConflictKind::Cautionary { warning } => format!("{}: {}", pair, warning),
    }
}
