//! Serde model for the prompt grammar document.
//!
//! Every section and map is optional in the JSON document: missing fields
//! and explicit `null`s both deserialize to empty values, so lookups never
//! have to distinguish "absent" from "empty". Maps are `IndexMap`s so that
//! iteration follows document order.

use crate::axis::{Axis, PersonaAxis};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// `token -> text` map.
pub type TokenMap = IndexMap<String, String>;

/// `axis -> token -> text` map.
pub type AxisMap = IndexMap<String, TokenMap>;

/// `partnerAxis -> composition` entry for one token.
pub type CompositionEntry = IndexMap<String, Composition>;

/// `axis -> token -> partnerAxis -> composition` table.
pub type CompositionTable = IndexMap<String, IndexMap<String, CompositionEntry>>;

/// Treat an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Nested `null`s: a null map value becomes its default, a null list item is
// dropped. Applied at every level below the top-level sections.

type RawTokenMap = IndexMap<String, Option<String>>;
type RawList = Vec<Option<String>>;

fn lenient_tokens(raw: Option<RawTokenMap>) -> TokenMap {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(token, text)| (token, text.unwrap_or_default()))
        .collect()
}

fn lenient_list(raw: Option<RawList>) -> Vec<String> {
    raw.unwrap_or_default().into_iter().flatten().collect()
}

fn token_map<'de, D>(deserializer: D) -> Result<TokenMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_tokens(Option::deserialize(deserializer)?))
}

fn axis_map<'de, D>(deserializer: D) -> Result<AxisMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<RawTokenMap>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(axis, tokens)| (axis, lenient_tokens(tokens)))
        .collect())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list(Option::deserialize(deserializer)?))
}

fn list_map<'de, D>(deserializer: D) -> Result<IndexMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<RawList>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, values)| (key, lenient_list(values)))
        .collect())
}

fn incompatibility_map<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, IndexMap<String, Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<IndexMap<String, Option<RawList>>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(axis, rules)| {
            let rules = rules
                .unwrap_or_default()
                .into_iter()
                .map(|(token, partners)| (token, lenient_list(partners)))
                .collect();
            (axis, rules)
        })
        .collect())
}

fn composition_table<'de, D>(deserializer: D) -> Result<CompositionTable, D::Error>
where
    D: Deserializer<'de>,
{
    type RawEntry = IndexMap<String, Option<Composition>>;
    let raw: Option<IndexMap<String, Option<IndexMap<String, Option<RawEntry>>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(axis, tokens)| {
            let tokens = tokens
                .unwrap_or_default()
                .into_iter()
                .map(|(token, entry)| {
                    let entry = entry
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(partner, composition)| (partner, composition.unwrap_or_default()))
                        .collect();
                    (token, entry)
                })
                .collect();
            (axis, tokens)
        })
        .collect())
}

/// Soft caps; a `null` cap means no cap.
fn soft_caps<'de, D>(deserializer: D) -> Result<IndexMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<u32>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(axis, cap)| cap.map(|cap| (axis, cap)))
        .collect())
}

fn entries<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let raw: Option<IndexMap<String, Option<T>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

/// The full grammar document. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    #[serde(default, deserialize_with = "nullable")]
    pub schema_version: String,

    #[serde(default, deserialize_with = "nullable")]
    pub axes: AxisSection,

    #[serde(default, deserialize_with = "nullable")]
    pub tasks: TaskSection,

    #[serde(default, deserialize_with = "nullable")]
    pub hierarchy: HierarchySection,

    #[serde(default, deserialize_with = "nullable")]
    pub persona: PersonaSection,

    #[serde(default, deserialize_with = "items")]
    pub patterns: Vec<UsagePattern>,

    #[serde(default, deserialize_with = "items")]
    pub starter_packs: Vec<StarterPack>,
}

/// Token definitions and per-token metadata for every constraint axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSection {
    #[serde(default, deserialize_with = "axis_map")]
    pub definitions: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub labels: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub guidance: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub use_when: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub kanji: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub categories: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub routing_concept: AxisMap,
    #[serde(default, deserialize_with = "composition_table")]
    pub cross_axis_composition: CompositionTable,
}

/// Task tokens. Flat maps: tasks form their own pseudo-axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSection {
    #[serde(default, deserialize_with = "token_map")]
    pub descriptions: TokenMap,
    #[serde(default, deserialize_with = "token_map")]
    pub labels: TokenMap,
    #[serde(default, deserialize_with = "token_map")]
    pub guidance: TokenMap,
    #[serde(default, deserialize_with = "token_map")]
    pub use_when: TokenMap,
    #[serde(default, deserialize_with = "token_map")]
    pub kanji: TokenMap,
    #[serde(default, deserialize_with = "token_map")]
    pub routing_concept: TokenMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchySection {
    #[serde(default, deserialize_with = "string_list")]
    pub axis_priority: Vec<String>,

    /// Typical maximum number of tokens per axis.
    #[serde(default, deserialize_with = "soft_caps")]
    pub axis_soft_caps: IndexMap<String, u32>,

    /// `axis -> token -> [partner]`, each partner `token` or `axis:token`.
    #[serde(default, deserialize_with = "incompatibility_map")]
    pub axis_incompatibilities: IndexMap<String, IndexMap<String, Vec<String>>>,
}

/// Natural and cautionary pairings with one partner axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    #[serde(default, deserialize_with = "string_list")]
    pub natural: Vec<String>,

    /// `token -> warning text`.
    #[serde(default, deserialize_with = "token_map")]
    pub cautionary: TokenMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaSection {
    #[serde(default, deserialize_with = "entries")]
    pub presets: IndexMap<String, PersonaPreset>,

    /// `voice|audience|tone -> [value]`.
    #[serde(default, deserialize_with = "list_map")]
    pub axes: IndexMap<String, Vec<String>>,

    #[serde(default, deserialize_with = "axis_map")]
    pub docs: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub labels: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub guidance: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub use_when: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub kanji: AxisMap,
    #[serde(default, deserialize_with = "axis_map")]
    pub routing_concept: AxisMap,

    #[serde(default, deserialize_with = "nullable")]
    pub intent: IntentSection,
}

/// A named bundle fixing voice, audience and tone together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaPreset {
    #[serde(default, deserialize_with = "nullable")]
    pub key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub spoken: Option<String>,
}

impl PersonaPreset {
    /// The preset's value for a free-form persona axis, `""` when unset.
    pub fn field(&self, axis: PersonaAxis) -> &str {
        let value = match axis {
            PersonaAxis::Voice => &self.voice,
            PersonaAxis::Audience => &self.audience,
            PersonaAxis::Tone => &self.tone,
            PersonaAxis::Intent => return "",
        };
        value.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentSection {
    #[serde(default, deserialize_with = "list_map")]
    pub axis_tokens: IndexMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "token_map")]
    pub docs: TokenMap,
}

/// A canned example selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePattern {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub command: String,
    #[serde(default, deserialize_with = "nullable")]
    pub example: String,
    #[serde(default, deserialize_with = "nullable")]
    pub desc: String,
    #[serde(default, deserialize_with = "list_map")]
    pub tokens: IndexMap<String, Vec<String>>,
}

/// A task framing mapped to a suggested command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarterPack {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub framing: String,
    #[serde(default, deserialize_with = "nullable")]
    pub command: String,
}

/// A literal token declared by more than one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCollision {
    pub token: String,
    /// Declaring axes in index-build order; the last one wins in the parser.
    pub axes: Vec<String>,
}

/// An incompatibility rule naming a partner no axis declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingRule {
    pub axis: String,
    pub token: String,
    pub partner: String,
}

fn lookup<'a>(map: &'a AxisMap, axis: &str, token: &str) -> &'a str {
    map.get(axis)
        .and_then(|tokens| tokens.get(token))
        .map(String::as_str)
        .unwrap_or("")
}

impl Grammar {
    /// Definition of `token` on `axis`, if declared.
    pub fn axis_definition(&self, axis: &str, token: &str) -> Option<&str> {
        self.axes
            .definitions
            .get(axis)
            .and_then(|defs| defs.get(token))
            .map(String::as_str)
    }

    /// Description of a task token, if declared.
    pub fn task_description(&self, token: &str) -> Option<&str> {
        self.tasks.descriptions.get(token).map(String::as_str)
    }

    /// Kanji glyph for `token` on `axis`, `""` when absent.
    pub fn kanji(&self, axis: &str, token: &str) -> &str {
        if axis == Axis::Task.as_str() {
            return self.tasks.kanji.get(token).map(String::as_str).unwrap_or("");
        }
        lookup(&self.axes.kanji, axis, token)
    }

    pub(crate) fn axis_field<'a>(map: &'a AxisMap, axis: &str, token: &str) -> &'a str {
        lookup(map, axis, token)
    }

    /// Raw composition entry for one token; no traversal.
    pub fn composition(&self, axis: &str, token: &str) -> Option<&CompositionEntry> {
        self.axes
            .cross_axis_composition
            .get(axis)
            .and_then(|tokens| tokens.get(token))
    }

    /// Incompatibility partners declared for `token` on `axis`.
    pub fn incompatibilities(&self, axis: &str, token: &str) -> &[String] {
        self.hierarchy
            .axis_incompatibilities
            .get(axis)
            .and_then(|tokens| tokens.get(token))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Values declared for a persona axis. Intent values come from
    /// `persona.intent.axis_tokens.intent`.
    pub fn persona_values(&self, axis: PersonaAxis) -> &[String] {
        let values = match axis {
            PersonaAxis::Intent => self.persona.intent.axis_tokens.get(axis.as_str()),
            _ => self.persona.axes.get(axis.as_str()),
        };
        values.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Descriptive doc for a persona value, if any.
    pub fn persona_doc(&self, axis: PersonaAxis, value: &str) -> Option<&str> {
        let intent_doc = match axis {
            PersonaAxis::Intent => self.persona.intent.docs.get(value),
            _ => None,
        };
        intent_doc
            .or_else(|| {
                self.persona
                    .docs
                    .get(axis.as_str())
                    .and_then(|docs| docs.get(value))
            })
            .map(String::as_str)
            .filter(|doc| !doc.trim().is_empty())
    }

    /// Preset by name.
    pub fn preset(&self, name: &str) -> Option<&PersonaPreset> {
        self.persona.presets.get(name)
    }

    /// Tokens declared by more than one axis (task pseudo-axis included).
    pub fn token_collisions(&self) -> Vec<TokenCollision> {
        let mut owners: IndexMap<&str, Vec<String>> = IndexMap::new();
        for token in self.tasks.descriptions.keys() {
            owners
                .entry(token.as_str())
                .or_default()
                .push(Axis::Task.as_str().to_string());
        }
        for (axis, defs) in &self.axes.definitions {
            for token in defs.keys() {
                owners.entry(token.as_str()).or_default().push(axis.clone());
            }
        }

        owners
            .into_iter()
            .filter(|(_, axes)| axes.len() > 1)
            .map(|(token, axes)| TokenCollision {
                token: token.to_string(),
                axes,
            })
            .collect()
    }

    /// Whether `token` is declared on `axis` (`task` included).
    pub fn declares(&self, axis: &str, token: &str) -> bool {
        if axis == Axis::Task.as_str() {
            self.task_description(token).is_some()
        } else {
            self.axis_definition(axis, token).is_some()
        }
    }

    /// Incompatibility rules whose partner is not declared. A qualified
    /// `axis:token` partner must exist on that axis; a bare one anywhere.
    pub fn dangling_incompatibilities(&self) -> Vec<DanglingRule> {
        let declared_anywhere = |token: &str| {
            self.tasks.descriptions.contains_key(token)
                || self
                    .axes
                    .definitions
                    .values()
                    .any(|defs| defs.contains_key(token))
        };

        let mut dangling = Vec::new();
        for (axis, rules) in &self.hierarchy.axis_incompatibilities {
            for (token, partners) in rules {
                for partner in partners {
                    let known = match partner.split_once(':') {
                        Some((partner_axis, partner_token)) => {
                            self.declares(partner_axis, partner_token)
                        }
                        None => declared_anywhere(partner),
                    };
                    if !known {
                        dangling.push(DanglingRule {
                            axis: axis.clone(),
                            token: token.clone(),
                            partner: partner.clone(),
                        });
                    }
                }
            }
        }
        dangling
    }
}
