//! Parser output types.

use crate::selection::{PersonaState, Selection};
use serde::Serialize;

/// Structured form of one command string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Selected tokens; always carries every axis in `Axis::PARSED`.
    pub selected: Selection,
    pub persona: PersonaState,
    /// `--subject` value, `""` when absent.
    pub subject: String,
    /// `--addendum` value, `""` when absent.
    pub addendum: String,
    /// Raw tokens the grammar does not know, in input order.
    pub unrecognized: Vec<String>,
}
