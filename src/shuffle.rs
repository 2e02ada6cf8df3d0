//! Random token selections for `bar shuffle`.
//!
//! Stages are drawn in a fixed order: persona preset, intent, voice,
//! audience, tone, task, then the six constraint axes. Each stage yields at
//! most one token, written the way `bar build` accepts it. A seeded
//! [`ChaCha8Rng`] makes a draw reproducible.

use crate::axis::{Axis, PersonaAxis};
use crate::grammar::{
    Grammar, get_axis_tokens, get_persona_intent_tokens, get_persona_presets, get_task_tokens,
    to_persona_slug,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// Probability that an optional stage is drawn when `--fill` is not given.
pub const DEFAULT_FILL: f64 = 0.5;

/// One draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// A persona preset, emitted as `persona=<name>`.
    Preset,
    Persona(PersonaAxis),
    Task,
    Constraint(Axis),
}

impl Stage {
    /// Every stage in draw order.
    pub const ORDER: [Stage; 12] = [
        Stage::Preset,
        Stage::Persona(PersonaAxis::Intent),
        Stage::Persona(PersonaAxis::Voice),
        Stage::Persona(PersonaAxis::Audience),
        Stage::Persona(PersonaAxis::Tone),
        Stage::Task,
        Stage::Constraint(Axis::Completeness),
        Stage::Constraint(Axis::Scope),
        Stage::Constraint(Axis::Method),
        Stage::Constraint(Axis::Form),
        Stage::Constraint(Axis::Channel),
        Stage::Constraint(Axis::Directional),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Preset => "persona",
            Stage::Persona(axis) => axis.as_str(),
            Stage::Task => "task",
            Stage::Constraint(axis) => axis.as_str(),
        }
    }

    /// Stages skipped once a preset has been drawn.
    fn covered_by_preset(self) -> bool {
        matches!(self, Stage::Persona(_))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "persona_preset" {
            return Ok(Stage::Preset);
        }
        Stage::ORDER
            .into_iter()
            .find(|stage| stage.as_str() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Stage::ORDER.iter().map(|stage| stage.as_str()).collect();
                format!(
                    "unknown shuffle axis '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                )
            })
    }
}

/// Settings for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleOptions {
    pub seed: u64,
    /// Stages always drawn (when the grammar has values for them).
    pub include: Vec<Stage>,
    /// Stages never drawn. Wins over `include`.
    pub exclude: Vec<Stage>,
    /// Probability in `0.0..=1.0` of drawing an optional stage.
    pub fill: f64,
}

impl ShuffleOptions {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            include: Vec::new(),
            exclude: Vec::new(),
            fill: DEFAULT_FILL,
        }
    }
}

/// Draw tokens with a generator seeded from `options.seed`.
pub fn shuffle(grammar: &Grammar, options: &ShuffleOptions) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    shuffle_with(grammar, options, &mut rng)
}

/// Draw tokens from `rng`.
///
/// The task stage and included stages are always drawn; any other stage is
/// drawn with probability `fill`. A drawn preset suppresses the intent and
/// free-form persona stages. Stages with no values are skipped.
pub fn shuffle_with<R: Rng>(
    grammar: &Grammar,
    options: &ShuffleOptions,
    rng: &mut R,
) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut preset_drawn = false;

    for stage in Stage::ORDER {
        if options.exclude.contains(&stage) {
            continue;
        }
        if preset_drawn && stage.covered_by_preset() {
            continue;
        }

        let mandatory = stage == Stage::Task || options.include.contains(&stage);
        if !mandatory && rng.r#gen::<f64>() >= options.fill {
            continue;
        }

        let candidates = stage_tokens(grammar, stage);
        if candidates.is_empty() {
            continue;
        }
        let pick = candidates[rng.gen_range(0..candidates.len())].clone();
        preset_drawn |= stage == Stage::Preset;
        tokens.push(pick);
    }
    tokens
}

/// Sorted candidates for one stage, in command-line form.
pub fn stage_tokens(grammar: &Grammar, stage: Stage) -> Vec<String> {
    match stage {
        Stage::Preset => get_persona_presets(grammar)
            .into_iter()
            .map(|(name, _)| format!("persona={}", name))
            .collect(),
        Stage::Persona(PersonaAxis::Intent) => get_persona_intent_tokens(grammar)
            .into_iter()
            .map(|intent| format!("intent={}", intent))
            .collect(),
        Stage::Persona(axis) => {
            let mut slugs: Vec<String> = grammar
                .persona_values(axis)
                .iter()
                .map(|value| format!("{}={}", axis, to_persona_slug(value)))
                .collect();
            slugs.sort();
            slugs.dedup();
            slugs
        }
        Stage::Task => get_task_tokens(grammar)
            .into_iter()
            .map(|meta| meta.token)
            .collect(),
        Stage::Constraint(axis) => get_axis_tokens(grammar, axis.as_str())
            .into_iter()
            .map(|meta| meta.token)
            .collect(),
    }
}
