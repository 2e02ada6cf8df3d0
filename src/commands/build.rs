//! Implementation of the `bar build` command.
//!
//! Parses the tokens, renders the prompt and reports advisory problems:
//! - unrecognized tokens, conflicts and soft-cap overflows go to stderr
//!   as warnings
//! - with `--strict` (or `fail_on_conflicts`) any conflict aborts the build
//!   with exit code 3 before anything is printed

use super::{describe_conflict, to_json};
use crate::cli::BuildArgs;
use crate::config::{Config, OutputFormat};
use crate::context::Session;
use crate::error::{BarError, Result};
use crate::grammar::Grammar;
use crate::parser::{ParseResult, parse_command};
use crate::render::BuildReport;
use std::io::Read;
use std::path::Path;

/// Execute the `bar build` command.
pub fn cmd_build(session: &Session, args: BuildArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let config = &session.config;

    let input = match &args.input {
        Some(path) => Some(read_input(path)?),
        None => None,
    };
    let parsed = parse_build_args(&grammar, &args, input);
    let report = BuildReport::assemble(&grammar, &parsed);

    for warning in build_warnings(&report, config) {
        eprintln!("Warning: {}", warning);
    }

    if (args.strict || config.fail_on_conflicts) && !report.conflicts.is_empty() {
        let pairs: Vec<String> = report.conflicts.iter().map(describe_conflict).collect();
        return Err(BarError::Conflicts(pairs.join("; ")));
    }

    print_report(&report, args.json || config.output == OutputFormat::Json)
}

/// Print the prompt, or the whole report as JSON.
pub(super) fn print_report(report: &BuildReport, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(report)?);
    } else {
        print!("{}", report.prompt);
    }
    Ok(())
}

/// Parse the positional tokens, then let `--subject`, `--input` and
/// `--addendum` override whatever the tokens carried.
pub(super) fn parse_build_args(
    grammar: &Grammar,
    args: &BuildArgs,
    input: Option<String>,
) -> ParseResult {
    let mut parsed = parse_command(&args.tokens.join(" "), grammar);

    if let Some(subject) = args.subject.clone().or(input) {
        parsed.subject = subject;
    }
    if let Some(addendum) = &args.addendum {
        parsed.addendum = addendum.clone();
    }
    parsed
}

/// Warning lines for a finished build, without the `Warning: ` prefix.
pub(super) fn build_warnings(report: &BuildReport, config: &Config) -> Vec<String> {
    let mut warnings: Vec<String> = report
        .unrecognized
        .iter()
        .map(|token| format!("unrecognized token '{}'", token))
        .collect();

    warnings.extend(report.conflicts.iter().map(describe_conflict));

    if config.warn_soft_caps {
        warnings.extend(report.soft_cap_overflows.iter().map(|overflow| {
            format!(
                "axis '{}' has {} tokens (soft cap {})",
                overflow.axis, overflow.selected, overflow.cap
            )
        }));
    }
    warnings
}

/// Read the subject from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| BarError::UserError(format!("failed to read subject from stdin: {}", e)))?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).map_err(|e| {
        BarError::UserError(format!(
            "failed to read subject file '{}': {}",
            path.display(),
            e
        ))
    })
}
