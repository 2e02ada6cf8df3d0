//! CLI argument parsing for bar.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::shuffle::DEFAULT_FILL;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Bar: build structured LLM prompts from grammar tokens.
///
/// Tokens are picked across independent axes (task, completeness, scope,
/// method, form, channel, directional) plus persona settings, and rendered
/// into a fixed-layout prompt:
/// - `bar build show mean full plain --subject "..."` renders a prompt
/// - `bar tokens form` lists what an axis offers
/// - `bar conflicts` and `bar chip` explain how tokens combine
#[derive(Parser, Debug)]
#[command(name = "bar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Grammar JSON document (overrides BAR_GRAMMAR_PATH and the config).
    #[arg(long, global = true, value_name = "PATH")]
    pub grammar: Option<PathBuf>,

    /// Config file (overrides BAR_CONFIG and ./bar.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log detail on stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands for bar.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a prompt from tokens.
    ///
    /// Tokens are classified against the grammar; `key=value` pairs set
    /// the persona (voice, audience, tone, intent, persona). Warnings for
    /// unknown tokens, conflicts and soft-cap overflows go to stderr.
    Build(BuildArgs),

    /// Parse a command string and show the resulting selection.
    ///
    /// Prints the selection, persona, free text, unrecognized tokens and
    /// the canonical form of the command.
    Parse(ParseArgs),

    /// List tokens and their metadata.
    ///
    /// Without an axis, lists the axes with token counts.
    Tokens(TokensArgs),

    /// List conflicting token pairs in a selection.
    Conflicts(ConflictsArgs),

    /// Show the traffic-light state of one token against active tokens.
    Chip(ChipArgs),

    /// List the grammar's usage patterns.
    Patterns(ListArgs),

    /// List the grammar's starter packs.
    Starters(ListArgs),

    /// Check the grammar for structural problems.
    ///
    /// Reports tokens declared on several axes and incompatibility rules
    /// naming tokens that do not exist.
    Check,

    /// Render a prompt from randomly drawn tokens.
    ///
    /// Draws a task plus, with probability `--fill`, one token per persona
    /// stage and constraint axis. The same `--seed` gives the same prompt.
    Shuffle(ShuffleArgs),

    /// Print a shell completion script.
    Completion(CompletionArgs),

    /// Suggest build tokens for the last of WORDS (used by completion scripts).
    #[command(name = "__complete", hide = true)]
    Complete(CompleteArgs),
}

/// Arguments for the `build` command.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Tokens and key=value persona settings.
    pub tokens: Vec<String>,

    /// Subject text (the material the prompt is about).
    #[arg(long, short)]
    pub subject: Option<String>,

    /// Clarification of how to perform the task.
    #[arg(long, short)]
    pub addendum: Option<String>,

    /// Read the subject from a file, or stdin with `-`.
    #[arg(long, short, value_name = "FILE", conflicts_with = "subject")]
    pub input: Option<PathBuf>,

    /// Print the full build report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Fail (exit 3) when the selection has conflicts.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `parse` command.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Command string, e.g. `bar build show mean --subject "..."`.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Print the parse result as JSON. Also honoured after the command.
    #[arg(long)]
    pub json: bool,
}

impl ParseArgs {
    /// `--json` given before the command, or anywhere inside it.
    pub fn wants_json(&self) -> bool {
        self.json || self.command.iter().any(|word| word == JSON_FLAG)
    }

    /// The command words joined back into one line, `--json` removed.
    pub fn command_line(&self) -> String {
        self.command
            .iter()
            .filter(|word| *word != JSON_FLAG)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const JSON_FLAG: &str = "--json";

/// Arguments for the `tokens` command.
#[derive(Parser, Debug)]
pub struct TokensArgs {
    /// Axis to list (`task`, a grammar axis, `voice`, `audience`, `tone`,
    /// `intent` or `persona` for presets).
    pub axis: Option<String>,

    /// Only show tokens matching this glob.
    #[arg(long = "match", short = 'm', value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Group `method` tokens by category.
    #[arg(long)]
    pub by_category: bool,

    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `conflicts` command.
#[derive(Parser, Debug)]
pub struct ConflictsArgs {
    /// Tokens of the selection to check.
    pub tokens: Vec<String>,

    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `chip` command.
#[derive(Parser, Debug)]
pub struct ChipArgs {
    /// Axis of the chip (`task` or a grammar axis).
    pub axis: String,

    /// Token of the chip.
    pub token: String,

    /// Active tokens (comma-separated or repeated).
    #[arg(long, value_delimiter = ',')]
    pub active: Vec<String>,

    /// Only consider active channel and form tokens.
    #[arg(long)]
    pub driving_only: bool,

    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `shuffle` command.
#[derive(Parser, Debug)]
pub struct ShuffleArgs {
    /// Seed for a reproducible draw (default: time-based).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Always draw these stages (comma-separated or repeated).
    #[arg(long, value_delimiter = ',', value_name = "AXIS")]
    pub include: Vec<String>,

    /// Never draw these stages (comma-separated or repeated).
    #[arg(long, value_delimiter = ',', value_name = "AXIS")]
    pub exclude: Vec<String>,

    /// Probability of drawing each optional stage, 0.0 to 1.0.
    #[arg(long, default_value_t = DEFAULT_FILL)]
    pub fill: f64,

    /// Subject text.
    #[arg(long, short)]
    pub subject: Option<String>,

    /// Print the full build report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completion` command.
#[derive(Parser, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Arguments for the hidden `__complete` command.
#[derive(Parser, Debug)]
pub struct CompleteArgs {
    /// Words after `bar build`; the last one is being completed.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

/// Arguments for list commands.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
