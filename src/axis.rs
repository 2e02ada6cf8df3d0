//! Axis identity and ordering tables.
//!
//! Grammars are keyed by free-form strings, but the behaviour that depends on
//! an axis (which axes a parse result always carries, the order constraints
//! render in, how method categories are grouped) is driven from the enums in
//! this module so that a misspelled axis name is a compile error.

use std::fmt;
use std::str::FromStr;

/// Axes with fixed, built-in behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The task pseudo-axis (sourced from `tasks.*`, not `axes.*`).
    Task,
    Completeness,
    Scope,
    Method,
    Form,
    Channel,
    Directional,
}

impl Axis {
    /// Axes every parse result carries, in seeding order.
    pub const PARSED: [Axis; 7] = [
        Axis::Task,
        Axis::Completeness,
        Axis::Scope,
        Axis::Method,
        Axis::Form,
        Axis::Channel,
        Axis::Directional,
    ];

    /// Axes rendered in the CONSTRAINTS section, in render order.
    pub const CONSTRAINTS: [Axis; 6] = [
        Axis::Completeness,
        Axis::Scope,
        Axis::Method,
        Axis::Form,
        Axis::Channel,
        Axis::Directional,
    ];

    /// Axes whose active tokens drive the restricted chip traffic light.
    pub const DRIVING: [Axis; 2] = [Axis::Channel, Axis::Form];

    /// Key used for this axis in grammar documents and selections.
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Task => "task",
            Axis::Completeness => "completeness",
            Axis::Scope => "scope",
            Axis::Method => "method",
            Axis::Form => "form",
            Axis::Channel => "channel",
            Axis::Directional => "directional",
        }
    }

    /// Constraint heading: the axis name with its first letter capitalised.
    pub fn heading(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::PARSED
            .into_iter()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| format!("unknown axis '{}'", s))
    }
}

/// Free-form persona dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaAxis {
    Voice,
    Audience,
    Tone,
    Intent,
}

impl PersonaAxis {
    /// Persona axes listed under `persona.axes`.
    pub const FREE_FORM: [PersonaAxis; 3] =
        [PersonaAxis::Voice, PersonaAxis::Audience, PersonaAxis::Tone];

    /// All persona axes in render order.
    pub const ALL: [PersonaAxis; 4] = [
        PersonaAxis::Voice,
        PersonaAxis::Audience,
        PersonaAxis::Tone,
        PersonaAxis::Intent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PersonaAxis::Voice => "voice",
            PersonaAxis::Audience => "audience",
            PersonaAxis::Tone => "tone",
            PersonaAxis::Intent => "intent",
        }
    }

    /// Line label used in the PERSONA section.
    pub fn heading(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for PersonaAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaAxis::ALL
            .into_iter()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| format!("unknown persona axis '{}'", s))
    }
}

/// Semantic families for `method` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MethodCategory {
    Reasoning,
    Exploration,
    Structural,
    Diagnostic,
    ActorCentered,
    TemporalDynamic,
    Comparative,
    Generative,
}

impl MethodCategory {
    /// Canonical display order for method groups.
    pub const ORDER: [MethodCategory; 8] = [
        MethodCategory::Reasoning,
        MethodCategory::Exploration,
        MethodCategory::Structural,
        MethodCategory::Diagnostic,
        MethodCategory::ActorCentered,
        MethodCategory::TemporalDynamic,
        MethodCategory::Comparative,
        MethodCategory::Generative,
    ];

    /// Label as it appears in `axes.categories.method`.
    pub fn label(self) -> &'static str {
        match self {
            MethodCategory::Reasoning => "Reasoning",
            MethodCategory::Exploration => "Exploration",
            MethodCategory::Structural => "Structural",
            MethodCategory::Diagnostic => "Diagnostic",
            MethodCategory::ActorCentered => "Actor-centered",
            MethodCategory::TemporalDynamic => "Temporal/Dynamic",
            MethodCategory::Comparative => "Comparative",
            MethodCategory::Generative => "Generative",
        }
    }

    /// Look up a category by its grammar label.
    pub fn from_label(label: &str) -> Option<Self> {
        MethodCategory::ORDER
            .into_iter()
            .find(|category| category.label() == label)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
