//! Token suggestions for shell completion of `bar build`.
//!
//! The generated shell scripts call `bar __complete <words...>` with the
//! words typed after `build`; the last word is the one being completed
//! (possibly empty). Suggestions come from the loaded grammar, grouped by
//! category, with tokens already chosen and full axes left out.

use crate::axis::{Axis, PersonaAxis};
use crate::grammar::{
    Grammar, axis_soft_cap, get_axis_tokens, get_persona_axis_tokens_meta,
    get_persona_intent_tokens, get_persona_presets, get_task_tokens, to_persona_slug,
};
use crate::parser::parse_command;
use serde::Serialize;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub value: String,
    pub category: String,
    pub description: String,
}

impl Suggestion {
    fn new(value: impl Into<String>, category: &str, description: &str) -> Self {
        Self {
            value: value.into(),
            category: category.to_string(),
            description: description.to_string(),
        }
    }

    /// `value<TAB>description` line; tabs and newlines in the description
    /// are flattened to spaces.
    pub fn to_line(&self) -> String {
        let text = if self.description.is_empty() {
            self.category.clone()
        } else {
            format!("{}: {}", self.category, self.description)
        };
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        format!("{}\t{}", self.value, text)
    }
}

const BUILD_FLAGS: [(&str, &str); 5] = [
    ("--subject", "Subject text"),
    ("--addendum", "Clarification of how to perform the task"),
    ("--input", "Read the subject from a file, or stdin with -"),
    ("--json", "Print the full build report as JSON"),
    ("--strict", "Fail when the selection has conflicts"),
];

/// Flags whose next word is free text.
const VALUE_FLAGS: [&str; 6] = ["--subject", "-s", "--addendum", "-a", "--input", "-i"];

/// Axes that take a single token when the grammar sets no soft cap.
const SINGLE_CHOICE: [Axis; 4] = [Axis::Completeness, Axis::Form, Axis::Channel, Axis::Directional];

/// Suggestions for the last of `words`, given the words before it.
pub fn complete_build(grammar: &Grammar, words: &[String]) -> Vec<Suggestion> {
    let (current, prior) = match words.split_last() {
        Some((current, prior)) => (current.as_str(), prior),
        None => ("", words),
    };

    if prior.last().is_some_and(|word| VALUE_FLAGS.contains(&word.as_str())) {
        return Vec::new();
    }

    let candidates = if current.starts_with('-') {
        BUILD_FLAGS
            .iter()
            .map(|(flag, doc)| Suggestion::new(*flag, "flag", doc))
            .collect()
    } else {
        token_candidates(grammar, prior, current.contains('='))
    };

    let prefix = current.to_lowercase();
    candidates
        .into_iter()
        .filter(|s| s.value.to_lowercase().starts_with(&prefix))
        .collect()
}

fn token_candidates(grammar: &Grammar, prior: &[String], overrides: bool) -> Vec<Suggestion> {
    let typed: Vec<&str> = prior
        .iter()
        .map(String::as_str)
        .filter(|word| !word.starts_with('-'))
        .collect();
    let parsed = parse_command(&typed.join(" "), grammar);
    let persona = &parsed.persona;
    let mut out = Vec::new();

    if !overrides {
        if parsed.selected.get(Axis::Task.as_str()).is_empty() {
            out.extend(
                get_task_tokens(grammar)
                    .into_iter()
                    .map(|meta| Suggestion::new(meta.token, "task", &meta.description)),
            );
        }

        for axis in axis_order(grammar) {
            let used = parsed.selected.get(&axis);
            let cap = axis_soft_cap(grammar, &axis).map(|cap| cap as usize).or_else(|| {
                SINGLE_CHOICE
                    .iter()
                    .any(|single| single.as_str() == axis)
                    .then_some(1)
            });
            if cap.is_some_and(|cap| used.len() >= cap) {
                continue;
            }
            out.extend(
                get_axis_tokens(grammar, &axis)
                    .into_iter()
                    .filter(|meta| !used.contains(&meta.token))
                    .map(|meta| Suggestion::new(meta.token, &axis, &meta.description)),
            );
        }
    }

    if persona.preset.is_empty() {
        out.extend(
            get_persona_presets(grammar)
                .into_iter()
                .map(|(name, preset)| {
                    Suggestion::new(format!("persona={}", name), "persona", &preset.label)
                }),
        );

        for axis in PersonaAxis::FREE_FORM {
            if !persona.get(axis).is_empty() {
                continue;
            }
            out.extend(get_persona_axis_tokens_meta(grammar, axis).into_iter().map(|meta| {
                let slug = to_persona_slug(&meta.token);
                let value = if overrides {
                    format!("{}={}", axis, slug)
                } else {
                    slug
                };
                Suggestion::new(value, axis.as_str(), &meta.description)
            }));
        }
    }

    if persona.get(PersonaAxis::Intent).is_empty() {
        out.extend(get_persona_intent_tokens(grammar).into_iter().map(|intent| {
            let doc = grammar
                .persona_doc(PersonaAxis::Intent, &intent)
                .unwrap_or("")
                .to_string();
            let value = if overrides {
                format!("intent={}", intent)
            } else {
                intent
            };
            Suggestion::new(value, "intent", &doc)
        }));
    }

    out
}

/// `axis_priority` axes first, then the remaining defined axes sorted.
fn axis_order(grammar: &Grammar) -> Vec<String> {
    let definitions = &grammar.axes.definitions;
    let mut order: Vec<String> = grammar
        .hierarchy
        .axis_priority
        .iter()
        .filter(|axis| definitions.contains_key(axis.as_str()))
        .cloned()
        .collect();

    let mut rest: Vec<String> = definitions
        .keys()
        .filter(|axis| !order.contains(axis))
        .cloned()
        .collect();
    rest.sort();
    order.extend(rest);
    order.dedup();
    order
}
