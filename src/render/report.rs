//! Machine-readable record of one build.

use super::prompt::{constraint_lines, render_prompt};
use crate::grammar::Grammar;
use crate::parser::{ParseResult, to_command};
use crate::resolver::{Conflict, SoftCapOverflow, find_conflicts, soft_cap_overflows};
use crate::selection::{PersonaState, Selection};
use serde::Serialize;

/// Everything `bar build --json` prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Canonical command reproducing this build.
    pub command: String,
    pub selected: Selection,
    pub persona: PersonaState,
    pub subject: String,
    pub addendum: String,
    pub constraints: Vec<String>,
    pub conflicts: Vec<Conflict>,
    pub soft_cap_overflows: Vec<SoftCapOverflow>,
    pub unrecognized: Vec<String>,
    pub prompt: String,
}

impl BuildReport {
    /// Run the resolver and renderer over a parse result.
    pub fn assemble(grammar: &Grammar, parsed: &ParseResult) -> Self {
        let ParseResult {
            selected,
            persona,
            subject,
            addendum,
            unrecognized,
        } = parsed;

        Self {
            command: to_command(selected, persona, subject, addendum),
            constraints: constraint_lines(grammar, selected),
            conflicts: find_conflicts(grammar, selected),
            soft_cap_overflows: soft_cap_overflows(grammar, selected),
            prompt: render_prompt(grammar, selected, subject, addendum, Some(persona)),
            selected: selected.clone(),
            persona: persona.clone(),
            subject: subject.clone(),
            addendum: addendum.clone(),
            unrecognized: unrecognized.clone(),
        }
    }
}
