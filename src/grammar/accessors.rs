//! Projections from raw grammar data to sorted token metadata.
//!
//! All functions here are total: unknown axes, missing maps and missing keys
//! degrade to empty lists, `""` or `None`.

use super::model::{
    CompositionEntry, Grammar, PersonaPreset, StarterPack, TokenMap, UsagePattern,
};
use crate::axis::{Axis, MethodCategory, PersonaAxis};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Display metadata for one selectable token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenMeta {
    pub token: String,
    pub label: String,
    pub description: String,
    pub guidance: String,
    pub use_when: String,
    pub kanji: String,
    pub category: String,
    pub routing_concept: String,
}

/// Method tokens sharing one category. `category` is `""` for the
/// trailing group of uncategorised tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodGroup {
    pub category: String,
    pub tokens: Vec<TokenMeta>,
}

/// Every token defined for `axis`, sorted lexicographically.
pub fn get_axis_tokens(grammar: &Grammar, axis: &str) -> Vec<TokenMeta> {
    let Some(defs) = grammar.axes.definitions.get(axis) else {
        return Vec::new();
    };
    let axes = &grammar.axes;

    let mut tokens: Vec<&String> = defs.keys().collect();
    tokens.sort();

    tokens
        .into_iter()
        .map(|token| TokenMeta {
            token: token.clone(),
            label: Grammar::axis_field(&axes.labels, axis, token).to_string(),
            description: defs.get(token.as_str()).cloned().unwrap_or_default(),
            guidance: Grammar::axis_field(&axes.guidance, axis, token).to_string(),
            use_when: Grammar::axis_field(&axes.use_when, axis, token).to_string(),
            kanji: Grammar::axis_field(&axes.kanji, axis, token).to_string(),
            category: Grammar::axis_field(&axes.categories, axis, token).to_string(),
            routing_concept: Grammar::axis_field(&axes.routing_concept, axis, token).to_string(),
        })
        .collect()
}

/// Every task token, sorted. Tasks have no category.
pub fn get_task_tokens(grammar: &Grammar) -> Vec<TokenMeta> {
    let tasks = &grammar.tasks;
    let field = |map: &TokenMap, token: &str| map.get(token).cloned().unwrap_or_default();

    let mut tokens: Vec<&String> = tasks.descriptions.keys().collect();
    tokens.sort();

    tokens
        .into_iter()
        .map(|token| TokenMeta {
            token: token.clone(),
            label: field(&tasks.labels, token),
            description: field(&tasks.descriptions, token),
            guidance: field(&tasks.guidance, token),
            use_when: field(&tasks.use_when, token),
            kanji: field(&tasks.kanji, token),
            category: String::new(),
            routing_concept: field(&tasks.routing_concept, token),
        })
        .collect()
}

/// Group `method` tokens by category.
///
/// Known categories follow [`MethodCategory::ORDER`]; categories the enum
/// does not know come next in lexicographic order; uncategorised tokens
/// form one trailing group with `category == ""`. Empty groups are omitted
/// and tokens keep their lexicographic axis order inside each group.
pub fn get_method_tokens_by_category(grammar: &Grammar) -> Vec<MethodGroup> {
    let tokens = get_axis_tokens(grammar, Axis::Method.as_str());

    let mut known: Vec<(MethodCategory, Vec<TokenMeta>)> = Vec::new();
    let mut unknown: Vec<(String, Vec<TokenMeta>)> = Vec::new();
    let mut uncategorised = Vec::new();

    for meta in tokens {
        if meta.category.is_empty() {
            uncategorised.push(meta);
        } else if let Some(category) = MethodCategory::from_label(&meta.category) {
            match known.iter_mut().find(|(c, _)| *c == category) {
                Some((_, group)) => group.push(meta),
                None => known.push((category, vec![meta])),
            }
        } else {
            match unknown.iter_mut().find(|(c, _)| *c == meta.category) {
                Some((_, group)) => group.push(meta),
                None => unknown.push((meta.category.clone(), vec![meta])),
            }
        }
    }

    known.sort_by_key(|(category, _)| *category);
    unknown.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups: Vec<MethodGroup> = known
        .into_iter()
        .map(|(category, tokens)| MethodGroup {
            category: category.label().to_string(),
            tokens,
        })
        .chain(
            unknown
                .into_iter()
                .map(|(category, tokens)| MethodGroup { category, tokens }),
        )
        .collect();

    if !uncategorised.is_empty() {
        groups.push(MethodGroup {
            category: String::new(),
            tokens: uncategorised,
        });
    }
    groups
}

/// Sorted values of a persona axis with metadata keyed by the literal value.
pub fn get_persona_axis_tokens_meta(grammar: &Grammar, axis: PersonaAxis) -> Vec<TokenMeta> {
    let persona = &grammar.persona;
    let key = axis.as_str();

    let mut values: Vec<&String> = grammar.persona_values(axis).iter().collect();
    values.sort();
    values.dedup();

    values
        .into_iter()
        .map(|value| TokenMeta {
            token: value.clone(),
            label: Grammar::axis_field(&persona.labels, key, value).to_string(),
            description: grammar.persona_doc(axis, value).unwrap_or("").to_string(),
            guidance: Grammar::axis_field(&persona.guidance, key, value).to_string(),
            use_when: Grammar::axis_field(&persona.use_when, key, value).to_string(),
            kanji: Grammar::axis_field(&persona.kanji, key, value).to_string(),
            category: String::new(),
            routing_concept: Grammar::axis_field(&persona.routing_concept, key, value)
                .to_string(),
        })
        .collect()
}

/// Sorted intent tokens; empty if the grammar declares none.
pub fn get_persona_intent_tokens(grammar: &Grammar) -> Vec<String> {
    let mut tokens = grammar.persona_values(PersonaAxis::Intent).to_vec();
    tokens.sort();
    tokens.dedup();
    tokens
}

/// Persona presets sorted by name.
pub fn get_persona_presets(grammar: &Grammar) -> Vec<(&str, &PersonaPreset)> {
    let mut presets: Vec<(&str, &PersonaPreset)> = grammar
        .persona
        .presets
        .iter()
        .map(|(name, preset)| (name.as_str(), preset))
        .collect();
    presets.sort_by(|a, b| a.0.cmp(b.0));
    presets
}

/// Raw composition lookup for one token.
pub fn get_composition_data<'a>(
    grammar: &'a Grammar,
    axis: &str,
    token: &str,
) -> Option<&'a CompositionEntry> {
    grammar.composition(axis, token)
}

pub fn get_usage_patterns(grammar: &Grammar) -> &[UsagePattern] {
    &grammar.patterns
}

pub fn get_starter_packs(grammar: &Grammar) -> &[StarterPack] {
    &grammar.starter_packs
}

/// Soft cap declared for `axis` in `hierarchy.axis_soft_caps`.
pub fn axis_soft_cap(grammar: &Grammar, axis: &str) -> Option<u32> {
    grammar.hierarchy.axis_soft_caps.get(axis).copied()
}

/// Command-line form of a persona value: lowercase, whitespace runs
/// collapsed to a single `-`.
pub fn to_persona_slug(value: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&value.to_lowercase(), "-")
        .into_owned()
}
