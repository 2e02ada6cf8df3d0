//! Selection and persona state.
//!
//! Both are plain values owned by the caller. The core takes them by
//! reference and never mutates them; the parser is the only place that
//! builds them up token by token.

use crate::axis::{Axis, PersonaAxis};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Selected tokens per axis (the `task` pseudo-axis included).
///
/// Axis order is insertion order. Tokens within an axis keep their first
/// insertion position and are never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    axes: IndexMap<String, Vec<String>>,
}

impl Selection {
    /// A selection seeded with an empty entry for every axis in
    /// [`Axis::PARSED`].
    pub fn new() -> Self {
        let mut selection = Self::empty();
        for axis in Axis::PARSED {
            selection.axes.insert(axis.as_str().to_string(), Vec::new());
        }
        selection
    }

    /// A selection with no axis entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add `token` to `axis` unless it is already there.
    ///
    /// Returns `true` if the token was inserted.
    pub fn insert(&mut self, axis: &str, token: &str) -> bool {
        let tokens = self.axes.entry(axis.to_string()).or_default();
        if tokens.iter().any(|t| t == token) {
            return false;
        }
        tokens.push(token.to_string());
        true
    }

    /// Tokens selected on `axis`; empty for an unknown axis.
    pub fn get(&self, axis: &str) -> &[String] {
        self.axes.get(axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `token` is selected on `axis`.
    pub fn contains(&self, axis: &str, token: &str) -> bool {
        self.get(axis).iter().any(|t| t == token)
    }

    /// `(axis, tokens)` pairs in axis insertion order, empty axes included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.axes
            .iter()
            .map(|(axis, tokens)| (axis.as_str(), tokens.as_slice()))
    }

    /// Axis names in insertion order.
    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    /// Whether no token is selected on any axis.
    pub fn is_empty(&self) -> bool {
        self.axes.values().all(Vec::is_empty)
    }

    /// Total number of selected tokens.
    pub fn len(&self) -> usize {
        self.axes.values().map(Vec::len).sum()
    }
}

/// Persona choices for one prompt.
///
/// `preset` and the free-form fields are exclusive through the setters, but
/// a value built directly may carry both; the renderer decides which wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaState {
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub voice: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub intent: String,
}

impl PersonaState {
    /// Select a preset, clearing voice, audience and tone.
    pub fn set_preset(&mut self, preset: impl Into<String>) {
        self.preset = preset.into();
        self.voice.clear();
        self.audience.clear();
        self.tone.clear();
    }

    /// Set a persona axis. Voice, audience and tone clear the preset;
    /// intent is independent of it.
    pub fn set(&mut self, axis: PersonaAxis, value: impl Into<String>) {
        let value = value.into();
        match axis {
            PersonaAxis::Voice => self.voice = value,
            PersonaAxis::Audience => self.audience = value,
            PersonaAxis::Tone => self.tone = value,
            PersonaAxis::Intent => {
                self.intent = value;
                return;
            }
        }
        self.preset.clear();
    }

    /// Current value of a persona axis.
    pub fn get(&self, axis: PersonaAxis) -> &str {
        match axis {
            PersonaAxis::Voice => &self.voice,
            PersonaAxis::Audience => &self.audience,
            PersonaAxis::Tone => &self.tone,
            PersonaAxis::Intent => &self.intent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preset.is_empty()
            && PersonaAxis::ALL
                .into_iter()
                .all(|axis| self.get(axis).is_empty())
    }
}
