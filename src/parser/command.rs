//! Command string parsing.
//!
//! Parsing is total: anything the grammar does not classify ends up in
//! `unrecognized` instead of failing.

use super::types::ParseResult;
use crate::axis::{Axis, PersonaAxis};
use crate::grammar::{Grammar, to_persona_slug};
use crate::selection::{PersonaState, Selection};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static BAR_BUILD_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^bar\s+build(?:\s+|$)").expect("Invalid bar build prefix regex")
});

static BUILD_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^build(?:\s+|$)").expect("Invalid build prefix regex"));

static SUBJECT_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"--subject\s+"((?:[^"\\]|\\.)*)""#).expect("Invalid subject flag regex")
});

static ADDENDUM_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"--addendum\s+"((?:[^"\\]|\\.)*)""#).expect("Invalid addendum flag regex")
});

/// `key=value` keys applied to the persona state.
const PERSONA_KEY: &str = "persona";

/// Parse a `bar build ...` command string against `grammar`.
///
/// # Example
///
/// ```
/// use bar_prompt::grammar::Grammar;
/// use bar_prompt::parser::parse_command;
///
/// let grammar = Grammar::from_json(r#"{"tasks": {"descriptions": {"show": "Show."}}}"#).unwrap();
/// let result = parse_command(r#"bar build show show --subject "hi""#, &grammar);
/// assert_eq!(result.selected.get("task"), ["show"]);
/// assert_eq!(result.subject, "hi");
/// ```
pub fn parse_command(raw: &str, grammar: &Grammar) -> ParseResult {
    let cmd = BAR_BUILD_PREFIX.replace(raw.trim(), "");
    let cmd = BUILD_PREFIX.replace(&cmd, "");

    let (cmd, subject) = extract_flag(&cmd, &SUBJECT_FLAG);
    let (cmd, addendum) = extract_flag(&cmd, &ADDENDUM_FLAG);

    let token_index = build_token_index(grammar);
    let persona_index = build_persona_index(grammar);

    let mut selected = Selection::new();
    let mut persona = PersonaState::default();
    let mut unrecognized = Vec::new();

    for tok in cmd.split_whitespace() {
        if tok.starts_with("--") {
            debug!(flag = tok, "dropping unrecognized flag");
            continue;
        }

        if let Some((key, value)) = tok.split_once('=') {
            let key = key.to_lowercase();
            if key == PERSONA_KEY {
                persona.set_preset(value);
            } else if let Ok(axis) = key.parse::<PersonaAxis>() {
                apply_persona(&mut persona, grammar, axis, value);
            } else {
                debug!(token = tok, "unrecognized key=value pair");
                unrecognized.push(tok.to_string());
            }
            continue;
        }

        if let Some(axis) = token_index.get(tok) {
            selected.insert(axis, tok);
        } else if let Some(axis) = persona_index.get(tok) {
            apply_persona(&mut persona, grammar, *axis, tok);
        } else {
            debug!(token = tok, "unrecognized token");
            unrecognized.push(tok.to_string());
        }
    }

    ParseResult {
        selected,
        persona,
        subject,
        addendum,
        unrecognized,
    }
}

/// Remove the first `--flag "value"` match and return the rest plus the
/// unescaped value.
fn extract_flag(cmd: &str, flag: &Regex) -> (String, String) {
    let Some(caps) = flag.captures(cmd) else {
        return (cmd.to_string(), String::new());
    };
    let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
        return (cmd.to_string(), String::new());
    };

    let mut rest = String::with_capacity(cmd.len());
    rest.push_str(&cmd[..whole.start()]);
    rest.push_str(&cmd[whole.end()..]);

    (rest.trim().to_string(), unescape(value.as_str()))
}

/// Undo `\"` and `\\` escapes; any other backslash is kept as written.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push(c);
                out.push(next);
            }
            None => out.push(c),
        }
    }
    out
}

/// Token -> axis, tasks first, then every axis in document order. A token
/// declared twice resolves to the later axis.
fn build_token_index(grammar: &Grammar) -> IndexMap<&str, &str> {
    let mut index = IndexMap::new();
    for token in grammar.tasks.descriptions.keys() {
        index.insert(token.as_str(), Axis::Task.as_str());
    }
    for (axis, defs) in &grammar.axes.definitions {
        for token in defs.keys() {
            if let Some(previous) = index.insert(token.as_str(), axis.as_str()) {
                debug!(token = %token, previous, axis = %axis, "token index overwrite");
            }
        }
    }
    index
}

/// Bare persona value -> persona axis. Voice, audience and tone are indexed
/// under both their canonical and slug forms.
fn build_persona_index(grammar: &Grammar) -> IndexMap<String, PersonaAxis> {
    let mut index = IndexMap::new();
    for axis in PersonaAxis::FREE_FORM {
        for value in grammar.persona_values(axis) {
            index.insert(value.clone(), axis);
            let slug = to_persona_slug(value);
            if slug != *value {
                index.insert(slug, axis);
            }
        }
    }
    for token in grammar.persona_values(PersonaAxis::Intent) {
        index.insert(token.clone(), PersonaAxis::Intent);
    }
    index
}

fn apply_persona(persona: &mut PersonaState, grammar: &Grammar, axis: PersonaAxis, value: &str) {
    let value = match axis {
        PersonaAxis::Intent => value.to_string(),
        _ => resolve_persona_slug(value, grammar.persona_values(axis)),
    };
    persona.set(axis, value);
}

/// Map a slug such as `as-designer` back to its canonical value.
///
/// Tries an exact match, then the de-hyphenated form, then a
/// case-insensitive match of the de-hyphenated form; falls back to `value`.
pub(crate) fn resolve_persona_slug(value: &str, known: &[String]) -> String {
    if known.iter().any(|k| k == value) {
        return value.to_string();
    }

    let deslugged = value.replace('-', " ");
    if known.iter().any(|k| *k == deslugged) {
        return deslugged;
    }

    let lower = deslugged.to_lowercase();
    known
        .iter()
        .find(|k| k.to_lowercase() == lower)
        .cloned()
        .unwrap_or_else(|| value.to_string())
}
