//! Selection to command string.

use crate::axis::{Axis, PersonaAxis};
use crate::grammar::to_persona_slug;
use crate::selection::{PersonaState, Selection};

/// Serialize a selection back into a `bar build` command.
///
/// Order: task tokens, the constraint axes in render order, any other axes
/// in selection order, then persona, intent and the quoted flags. Blank
/// subject and addendum are omitted; backslashes and quotes inside them are
/// escaped so the command parses back to the same text.
pub fn to_command(
    selection: &Selection,
    persona: &PersonaState,
    subject: &str,
    addendum: &str,
) -> String {
    let mut parts: Vec<String> = vec!["bar".to_string(), "build".to_string()];

    let fixed: Vec<&str> = std::iter::once(Axis::Task)
        .chain(Axis::CONSTRAINTS)
        .map(Axis::as_str)
        .collect();

    for axis in &fixed {
        parts.extend(selection.get(axis).iter().cloned());
    }
    for (axis, tokens) in selection.iter() {
        if !fixed.contains(&axis) {
            parts.extend(tokens.iter().cloned());
        }
    }

    if !persona.preset.is_empty() {
        parts.push(format!("persona={}", persona.preset));
    } else {
        for axis in PersonaAxis::FREE_FORM {
            let value = persona.get(axis);
            if !value.is_empty() {
                parts.push(format!("{}={}", axis, to_persona_slug(value)));
            }
        }
    }
    if !persona.intent.is_empty() {
        parts.push(format!("intent={}", persona.intent));
    }

    for (flag, value) in [("subject", subject), ("addendum", addendum)] {
        let value = value.trim();
        if !value.is_empty() {
            let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
            parts.push(format!("--{} \"{}\"", flag, escaped));
        }
    }

    parts.join(" ")
}
