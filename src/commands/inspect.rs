//! Implementation of the `bar conflicts` and `bar chip` commands.

use super::{describe_conflict, to_json};
use crate::cli::{ChipArgs, ConflictsArgs};
use crate::context::Session;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::parser::parse_command;
use crate::resolver::{
    ChipReason, ChipState, Conflict, find_conflicts, get_chip_state, get_chip_state_with_reason,
};
use crate::selection::Selection;
use serde::Serialize;

/// Execute the `bar conflicts` command.
pub fn cmd_conflicts(session: &Session, args: ConflictsArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let selected = parse_active(&grammar, &args.tokens);
    let conflicts = find_conflicts(&grammar, &selected);

    if args.json {
        println!("{}", to_json(&conflicts)?);
    } else {
        print!("{}", format_conflicts(&conflicts));
    }
    Ok(())
}

pub(super) fn format_conflicts(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "No conflicts.\n".to_string();
    }
    conflicts
        .iter()
        .map(|conflict| format!("  {}\n", describe_conflict(conflict)))
        .collect()
}

/// `--json` shape of `bar chip`.
#[derive(Debug, Serialize)]
pub(super) struct ChipOutput {
    pub axis: String,
    pub token: String,
    pub state: Option<ChipState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub natural_with: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub caution_with: Vec<(String, String)>,
}

/// Execute the `bar chip` command.
pub fn cmd_chip(session: &Session, args: ChipArgs) -> Result<()> {
    let grammar = session.grammar()?;
    if !grammar.declares(&args.axis, &args.token) {
        eprintln!(
            "Warning: '{}' is not a token of axis '{}'",
            args.token, args.axis
        );
    }

    let active = parse_active(&grammar, &args.active);
    let output = chip_output(&grammar, &active, &args.axis, &args.token, args.driving_only);

    if args.json {
        println!("{}", to_json(&output)?);
    } else {
        print!("{}", format_chip(&output));
    }
    Ok(())
}

pub(super) fn chip_output(
    grammar: &Grammar,
    active: &Selection,
    axis: &str,
    token: &str,
    driving_only: bool,
) -> ChipOutput {
    let ChipReason {
        state,
        natural_with,
        caution_with,
    } = if driving_only {
        ChipReason {
            state: get_chip_state(grammar, active, axis, token),
            ..ChipReason::default()
        }
    } else {
        get_chip_state_with_reason(grammar, active, axis, token)
    };

    ChipOutput {
        axis: axis.to_string(),
        token: token.to_string(),
        state,
        natural_with,
        caution_with,
    }
}

pub(super) fn format_chip(output: &ChipOutput) -> String {
    let state = output.state.map_or("none", ChipState::as_str);
    let mut out = format!("{}:{} {}\n", output.axis, output.token, state);
    if !output.natural_with.is_empty() {
        out.push_str(&format!("  natural with: {}\n", output.natural_with.join(", ")));
    }
    for (token, warning) in &output.caution_with {
        out.push_str(&format!("  caution with {}: {}\n", token, warning));
    }
    out
}

/// Classify active tokens through the parser so bare tokens land on
/// their axes. Unknown tokens are reported and dropped.
fn parse_active(grammar: &Grammar, tokens: &[String]) -> Selection {
    let parsed = parse_command(&tokens.join(" "), grammar);
    for token in &parsed.unrecognized {
        eprintln!("Warning: unrecognized token '{}'", token);
    }
    parsed.selected
}
