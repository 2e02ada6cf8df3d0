//! Implementation of the `bar patterns` and `bar starters` commands.

use super::to_json;
use crate::cli::ListArgs;
use crate::context::Session;
use crate::error::Result;
use crate::grammar::{StarterPack, UsagePattern, get_starter_packs, get_usage_patterns};

/// Execute the `bar patterns` command.
pub fn cmd_patterns(session: &Session, args: ListArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let patterns = get_usage_patterns(&grammar);

    if args.json {
        println!("{}", to_json(patterns)?);
    } else {
        print!("{}", format_patterns(patterns));
    }
    Ok(())
}

/// Execute the `bar starters` command.
pub fn cmd_starters(session: &Session, args: ListArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let packs = get_starter_packs(&grammar);

    if args.json {
        println!("{}", to_json(packs)?);
    } else {
        print!("{}", format_starters(packs));
    }
    Ok(())
}

pub(super) fn format_patterns(patterns: &[UsagePattern]) -> String {
    if patterns.is_empty() {
        return "No usage patterns.\n".to_string();
    }

    let mut out = String::new();
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", pattern.title));
        if !pattern.desc.is_empty() {
            out.push_str(&format!("  {}\n", pattern.desc));
        }
        if !pattern.command.is_empty() {
            out.push_str(&format!("  $ {}\n", pattern.command));
        }
        if !pattern.example.is_empty() && pattern.example != pattern.command {
            out.push_str(&format!("  e.g. {}\n", pattern.example));
        }
    }
    out
}

pub(super) fn format_starters(packs: &[StarterPack]) -> String {
    if packs.is_empty() {
        return "No starter packs.\n".to_string();
    }

    let width = packs.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for pack in packs {
        out.push_str(&format!("{:<width$}  {}\n", pack.name, pack.framing));
        out.push_str(&format!("{:<width$}  $ {}\n", "", pack.command));
    }
    out
}
