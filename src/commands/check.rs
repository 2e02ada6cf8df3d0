//! Implementation of the `bar check` command.
//!
//! Structural checks over the loaded grammar. Any finding fails the command
//! with a validation error (exit code 2).

use crate::context::Session;
use crate::error::{BarError, Result};
use crate::grammar::Grammar;

/// Execute the `bar check` command.
pub fn cmd_check(session: &Session) -> Result<()> {
    let grammar = session.grammar()?;
    let findings = check_grammar(&grammar);

    if findings.is_empty() {
        println!("Grammar OK: {}", session.grammar_path().display());
        return Ok(());
    }

    for finding in &findings {
        println!("  {}", finding);
    }
    Err(BarError::Validation(format!(
        "{} problem(s) found in '{}'",
        findings.len(),
        session.grammar_path().display()
    )))
}

/// One line per problem: token collisions first, then dangling rules.
pub(super) fn check_grammar(grammar: &Grammar) -> Vec<String> {
    let collisions = grammar.token_collisions().into_iter().map(|collision| {
        format!(
            "token '{}' is declared on several axes: {}",
            collision.token,
            collision.axes.join(", ")
        )
    });

    let dangling = grammar
        .dangling_incompatibilities()
        .into_iter()
        .map(|rule| {
            format!(
                "incompatibility {}:{} names unknown token '{}'",
                rule.axis, rule.token, rule.partner
            )
        });

    collisions.chain(dangling).collect()
}
