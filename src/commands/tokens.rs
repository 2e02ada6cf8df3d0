//! Implementation of the `bar tokens` command.

use super::to_json;
use crate::axis::{Axis, PersonaAxis};
use crate::cli::TokensArgs;
use crate::context::Session;
use crate::error::{BarError, Result};
use crate::grammar::{
    Grammar, MethodGroup, TokenMeta, get_axis_tokens, get_method_tokens_by_category,
    get_persona_axis_tokens_meta, get_persona_presets, get_task_tokens,
};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;

/// Pseudo-axis name listing persona presets.
const PRESETS: &str = "persona";

/// Token count for one listable axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct AxisCount {
    pub axis: String,
    pub count: usize,
}

/// Execute the `bar tokens` command.
pub fn cmd_tokens(session: &Session, args: TokensArgs) -> Result<()> {
    let grammar = session.grammar()?;
    let matcher = args.pattern.as_deref().map(build_matcher).transpose()?;

    let Some(axis) = args.axis.as_deref() else {
        let counts = axis_counts(&grammar);
        if args.json {
            println!("{}", to_json(&counts)?);
        } else {
            for entry in &counts {
                println!("  {:<13} {}", entry.axis, entry.count);
            }
        }
        return Ok(());
    };

    if args.by_category {
        if axis != Axis::Method.as_str() {
            return Err(BarError::UserError(
                "--by-category only applies to the method axis".to_string(),
            ));
        }
        let groups = filter_groups(get_method_tokens_by_category(&grammar), matcher.as_ref());
        if args.json {
            println!("{}", to_json(&groups)?);
        } else {
            print!("{}", format_groups(&groups));
        }
        return Ok(());
    }

    let mut tokens = list_tokens(&grammar, axis)?;
    if let Some(matcher) = &matcher {
        tokens.retain(|meta| matcher.is_match(&meta.token));
    }

    if args.json {
        println!("{}", to_json(&tokens)?);
    } else {
        print!("{}", format_tokens(&tokens));
    }
    Ok(())
}

/// Listable axes with their token counts: task, grammar axes in
/// `axis_priority` order then any other declared axis, persona axes,
/// intent and presets.
pub(super) fn axis_counts(grammar: &Grammar) -> Vec<AxisCount> {
    let definitions = &grammar.axes.definitions;
    let mut counts = vec![AxisCount {
        axis: Axis::Task.as_str().to_string(),
        count: grammar.tasks.descriptions.len(),
    }];

    let ordered = grammar
        .hierarchy
        .axis_priority
        .iter()
        .filter(|axis| definitions.contains_key(axis.as_str()))
        .chain(
            definitions
                .keys()
                .filter(|axis| !grammar.hierarchy.axis_priority.contains(axis)),
        );
    for axis in ordered {
        if counts.iter().any(|c| &c.axis == axis) {
            continue;
        }
        counts.push(AxisCount {
            axis: axis.clone(),
            count: definitions.get(axis.as_str()).map_or(0, |defs| defs.len()),
        });
    }

    for axis in PersonaAxis::ALL {
        counts.push(AxisCount {
            axis: axis.as_str().to_string(),
            count: get_persona_axis_tokens_meta(grammar, axis).len(),
        });
    }
    counts.push(AxisCount {
        axis: PRESETS.to_string(),
        count: grammar.persona.presets.len(),
    });
    counts
}

/// Token metadata for one listable axis.
pub(super) fn list_tokens(grammar: &Grammar, axis: &str) -> Result<Vec<TokenMeta>> {
    if axis == Axis::Task.as_str() {
        return Ok(get_task_tokens(grammar));
    }
    if axis == PRESETS {
        return Ok(preset_tokens(grammar));
    }
    if let Ok(persona_axis) = axis.parse::<PersonaAxis>() {
        return Ok(get_persona_axis_tokens_meta(grammar, persona_axis));
    }
    if grammar.axes.definitions.contains_key(axis) || axis.parse::<Axis>().is_ok() {
        return Ok(get_axis_tokens(grammar, axis));
    }

    Err(BarError::UserError(format!(
        "unknown axis '{}'. Run `bar tokens` to list axes.",
        axis
    )))
}

/// Presets shown as tokens; the description spells out their fields.
fn preset_tokens(grammar: &Grammar) -> Vec<TokenMeta> {
    get_persona_presets(grammar)
        .into_iter()
        .map(|(name, preset)| {
            let fields: Vec<String> = PersonaAxis::FREE_FORM
                .into_iter()
                .filter(|axis| !preset.field(*axis).is_empty())
                .map(|axis| format!("{}={}", axis, preset.field(axis)))
                .collect();
            TokenMeta {
                token: name.to_string(),
                label: preset.label.clone(),
                description: fields.join(", "),
                ..TokenMeta::default()
            }
        })
        .collect()
}

/// Compile a comma-separated list of globs.
pub(super) fn build_matcher(pattern: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for glob in pattern.split(',').map(str::trim).filter(|g| !g.is_empty()) {
        let glob = Glob::new(glob)
            .map_err(|e| BarError::UserError(format!("invalid --match pattern: {}", e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| BarError::UserError(format!("invalid --match pattern: {}", e)))
}

fn filter_groups(groups: Vec<MethodGroup>, matcher: Option<&GlobSet>) -> Vec<MethodGroup> {
    let Some(matcher) = matcher else {
        return groups;
    };
    groups
        .into_iter()
        .filter_map(|mut group| {
            group.tokens.retain(|meta| matcher.is_match(&meta.token));
            (!group.tokens.is_empty()).then_some(group)
        })
        .collect()
}

fn format_token(meta: &TokenMeta) -> String {
    let mut line = format!("  {:<16}", meta.token);
    if !meta.kanji.is_empty() {
        line.push_str(&format!(" {}", meta.kanji));
    }
    if !meta.label.is_empty() {
        line.push_str(&format!(" [{}]", meta.label));
    }
    if !meta.description.is_empty() {
        line.push_str(&format!(" {}", meta.description));
    }
    line.trim_end().to_string()
}

pub(super) fn format_tokens(tokens: &[TokenMeta]) -> String {
    if tokens.is_empty() {
        return "  (no tokens)\n".to_string();
    }
    tokens
        .iter()
        .map(|meta| format_token(meta) + "\n")
        .collect()
}

pub(super) fn format_groups(groups: &[MethodGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let heading = if group.category.is_empty() {
            "Uncategorized"
        } else {
            group.category.as_str()
        };
        out.push_str(&format!("{}:\n", heading));
        out.push_str(&format_tokens(&group.tokens));
    }
    out
}
