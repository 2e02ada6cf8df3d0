//! Prompt rendering.

use super::sections::*;
use crate::axis::{Axis, PersonaAxis};
use crate::grammar::Grammar;
use crate::selection::{PersonaState, Selection};

/// Render the structured prompt for a selection.
///
/// Section order is fixed: TASK, ADDENDUM (only when the trimmed addendum is
/// non-empty), CONSTRAINTS, PERSONA, REFERENCE KEY, the subject framing
/// sentence, SUBJECT and EXECUTION REMINDER. Each section is written as
/// `heading\nbody\n\n`; the result carries exactly one trailing newline.
pub fn render_prompt(
    grammar: &Grammar,
    selected: &Selection,
    subject: &str,
    addendum: &str,
    persona: Option<&PersonaState>,
) -> String {
    let mut out = String::new();

    let task = selected
        .get(Axis::Task.as_str())
        .first()
        .map(|token| grammar.task_description(token).unwrap_or(token))
        .unwrap_or("");
    write_section(&mut out, TASK_HEADING, task);

    if !addendum.trim().is_empty() {
        write_section(&mut out, ADDENDUM_HEADING, addendum);
    }

    let constraints: Vec<String> = constraint_lines(grammar, selected)
        .into_iter()
        .map(|line| format!("- {}", line))
        .collect();
    write_section(&mut out, CONSTRAINTS_HEADING, &constraints.join("\n"));

    let persona_body = persona
        .map(|persona| persona_lines(grammar, persona).join("\n"))
        .unwrap_or_default();
    write_section(&mut out, PERSONA_HEADING, &persona_body);

    write_section(&mut out, REFERENCE_KEY_HEADING, REFERENCE_KEY_TEXT);

    out.push_str(SUBJECT_FRAMING);
    out.push_str("\n\n");

    let subject = match subject.trim() {
        "" => SUBJECT_PLACEHOLDER,
        trimmed => trimmed,
    };
    write_section(&mut out, SUBJECT_HEADING, subject);

    write_section(&mut out, EXECUTION_REMINDER_HEADING, EXECUTION_REMINDER_TEXT);

    let mut rendered = out.trim_end().to_string();
    rendered.push('\n');
    rendered
}

/// CONSTRAINTS lines without the `- ` bullet, in fixed axis order and
/// selection order within each axis.
///
/// `Heading (token[ kanji]): description`, or `Heading: token[ kanji]` when
/// the token has no description.
pub fn constraint_lines(grammar: &Grammar, selected: &Selection) -> Vec<String> {
    let mut lines = Vec::new();
    for axis in Axis::CONSTRAINTS {
        let heading = axis.heading();
        for token in selected.get(axis.as_str()) {
            if token.is_empty() {
                continue;
            }
            let kanji = grammar.kanji(axis.as_str(), token);
            let label = if kanji.is_empty() {
                token.clone()
            } else {
                format!("{} {}", token, kanji)
            };
            match grammar.axis_definition(axis.as_str(), token) {
                Some(description) if !description.is_empty() => {
                    lines.push(format!("{} ({}): {}", heading, label, description))
                }
                _ => lines.push(format!("{}: {}", heading, label)),
            }
        }
    }
    lines
}

/// PERSONA lines. A known preset supplies voice, audience and tone outright;
/// otherwise the free-form fields are used. Intent is always appended.
fn persona_lines(grammar: &Grammar, persona: &PersonaState) -> Vec<String> {
    let mut lines = Vec::new();

    let preset = Some(persona.preset.as_str())
        .filter(|name| !name.is_empty())
        .and_then(|name| grammar.preset(name));

    match preset {
        Some(preset) => {
            for axis in PersonaAxis::FREE_FORM {
                let value = preset.field(axis);
                if !value.is_empty() {
                    lines.push(format!("{}: {}", axis.heading(), value));
                }
            }
        }
        None => {
            for axis in PersonaAxis::FREE_FORM {
                if let Some(line) = persona_line(grammar, axis, persona.get(axis)) {
                    lines.push(line);
                }
            }
        }
    }

    if let Some(line) = persona_line(grammar, PersonaAxis::Intent, &persona.intent) {
        lines.push(line);
    }
    lines
}

fn persona_line(grammar: &Grammar, axis: PersonaAxis, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    Some(match grammar.persona_doc(axis, value) {
        Some(doc) => format!("{} ({}): {}", axis.heading(), value, doc),
        None => format!("{}: {}", axis.heading(), value),
    })
}

/// Append `heading\nbody\n\n`, with a blank body written as `(none)`.
fn write_section(out: &mut String, heading: &str, body: &str) {
    let body = match body.trim() {
        "" => EMPTY_BODY,
        trimmed => trimmed,
    };
    out.push_str(heading);
    out.push('\n');
    out.push_str(body);
    out.push_str("\n\n");
}
