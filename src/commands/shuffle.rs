//! Implementation of the `bar shuffle` command.

use super::build::{build_warnings, print_report};
use crate::cli::ShuffleArgs;
use crate::config::OutputFormat;
use crate::context::Session;
use crate::error::{BarError, Result};
use crate::grammar::Grammar;
use crate::parser::{ParseResult, parse_command};
use crate::render::BuildReport;
use crate::shuffle::{ShuffleOptions, Stage, shuffle};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Execute the `bar shuffle` command.
pub fn cmd_shuffle(session: &Session, args: ShuffleArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let options = shuffle_options(&args)?;
    info!(seed = options.seed, fill = options.fill, "shuffling tokens");

    let parsed = shuffled_selection(&grammar, &options, args.subject);
    let report = BuildReport::assemble(&grammar, &parsed);

    for warning in build_warnings(&report, &session.config) {
        eprintln!("Warning: {}", warning);
    }

    print_report(
        &report,
        args.json || session.config.output == OutputFormat::Json,
    )
}

/// Validate the arguments. Without `--seed` the clock seeds the draw.
pub(super) fn shuffle_options(args: &ShuffleArgs) -> Result<ShuffleOptions> {
    if !(0.0..=1.0).contains(&args.fill) {
        return Err(BarError::UserError(format!(
            "--fill must be between 0.0 and 1.0, got {}",
            args.fill
        )));
    }

    Ok(ShuffleOptions {
        seed: args.seed.unwrap_or_else(clock_seed),
        include: parse_stages(&args.include)?,
        exclude: parse_stages(&args.exclude)?,
        fill: args.fill,
    })
}

/// Draw, parse and attach the subject.
pub(super) fn shuffled_selection(
    grammar: &Grammar,
    options: &ShuffleOptions,
    subject: Option<String>,
) -> ParseResult {
    let tokens = shuffle(grammar, options);
    let mut parsed = parse_command(&tokens.join(" "), grammar);
    if let Some(subject) = subject {
        parsed.subject = subject;
    }
    parsed
}

fn parse_stages(names: &[String]) -> Result<Vec<Stage>> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse::<Stage>().map_err(BarError::UserError))
        .collect()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
