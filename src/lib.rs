//! Bar: grammar resolution engine for structured LLM prompts.
//!
//! A grammar document declares axes of tokens (task, completeness, scope,
//! method, form, channel, directional), persona settings and the rules
//! relating them. This crate loads that grammar, parses one-line
//! `bar build ...` commands into a selection, surfaces conflicts and
//! composition advisories, and renders the final prompt.

pub mod axis;
pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod grammar;
pub mod logging;
pub mod parser;
pub mod render;
pub mod resolver;
pub mod selection;
pub mod shuffle;

#[cfg(test)]
mod test_support;

pub use error::{BarError, Result};
pub use grammar::Grammar;
pub use parser::{ParseResult, parse_command, to_command};
pub use render::render_prompt;
pub use selection::{PersonaState, Selection};
