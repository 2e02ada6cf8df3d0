//! Resolver result types.

use serde::Serialize;

/// Where a conflict came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictKind {
    /// A hard rule from `hierarchy.axis_incompatibilities`.
    Incompatibility,
    /// A cautionary pairing from `cross_axis_composition`.
    Cautionary { warning: String },
}

/// An unordered pair of selected tokens that should not be combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub token_a: String,
    pub axis_a: String,
    pub token_b: String,
    pub axis_b: String,
    #[serde(flatten)]
    pub kind: ConflictKind,
}

impl Conflict {
    /// Order-independent identity of the pair.
    pub fn key(&self) -> String {
        pair_key(&self.token_a, &self.token_b)
    }

    /// Whether this conflict involves `axis:token`.
    pub fn involves(&self, axis: &str, token: &str) -> bool {
        (self.axis_a == axis && self.token_a == token)
            || (self.axis_b == axis && self.token_b == token)
    }
}

pub(crate) fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}|{}", a, b)
    } else {
        format!("{}|{}", b, a)
    }
}

/// Traffic-light state of a chip. "No relationship" is `None` at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipState {
    Natural,
    Cautionary,
}

impl ChipState {
    pub fn as_str(self) -> &'static str {
        match self {
            ChipState::Natural => "natural",
            ChipState::Cautionary => "cautionary",
        }
    }
}

impl std::fmt::Display for ChipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chip's state plus the active tokens responsible for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChipReason {
    pub state: Option<ChipState>,
    /// Active tokens forming a natural pairing with the chip.
    pub natural_with: Vec<String>,
    /// `(active token, warning)` for every cautionary pairing.
    pub caution_with: Vec<(String, String)>,
}

/// An axis holding more tokens than its soft cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftCapOverflow {
    pub axis: String,
    pub cap: u32,
    pub selected: usize,
}
