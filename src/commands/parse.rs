//! Implementation of the `bar parse` command.

use super::to_json;
use crate::axis::PersonaAxis;
use crate::cli::ParseArgs;
use crate::context::Session;
use crate::error::Result;
use crate::parser::{ParseResult, parse_command, to_command};
use serde::Serialize;

/// `--json` shape: the parse result plus its canonical command.
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    #[serde(flatten)]
    parsed: &'a ParseResult,
    canonical: String,
}

/// Execute the `bar parse` command.
pub fn cmd_parse(session: &Session, args: ParseArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let parsed = parse_command(&args.command_line(), &grammar);

    if args.wants_json() {
        let output = ParseOutput {
            parsed: &parsed,
            canonical: canonical_command(&parsed),
        };
        println!("{}", to_json(&output)?);
    } else {
        print!("{}", format_parse_result(&parsed));
    }
    Ok(())
}

fn canonical_command(parsed: &ParseResult) -> String {
    to_command(
        &parsed.selected,
        &parsed.persona,
        &parsed.subject,
        &parsed.addendum,
    )
}

/// Human-readable summary; empty axes and fields are skipped.
pub(super) fn format_parse_result(parsed: &ParseResult) -> String {
    let mut out = String::new();

    out.push_str("Selection:\n");
    if parsed.selected.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (axis, tokens) in parsed.selected.iter() {
        if !tokens.is_empty() {
            out.push_str(&format!("  {:<13} {}\n", axis, tokens.join(" ")));
        }
    }

    let persona = &parsed.persona;
    if !persona.is_empty() {
        out.push_str("Persona:\n");
        if !persona.preset.is_empty() {
            out.push_str(&format!("  {:<13} {}\n", "preset", persona.preset));
        }
        for axis in PersonaAxis::ALL {
            let value = persona.get(axis);
            if !value.is_empty() {
                out.push_str(&format!("  {:<13} {}\n", axis.as_str(), value));
            }
        }
    }

    if !parsed.subject.is_empty() {
        out.push_str(&format!("Subject: {}\n", parsed.subject));
    }
    if !parsed.addendum.is_empty() {
        out.push_str(&format!("Addendum: {}\n", parsed.addendum));
    }
    if !parsed.unrecognized.is_empty() {
        out.push_str(&format!("Unrecognized: {}\n", parsed.unrecognized.join(" ")));
    }

    out.push_str(&format!("Command: {}\n", canonical_command(parsed)));
    out
}
