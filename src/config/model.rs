//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the `bar` command.
///
/// This struct represents the contents of `bar.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Grammar settings
    // =========================================================================
    /// Grammar document used when neither `--grammar` nor
    /// `BAR_GRAMMAR_PATH` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_path: Option<PathBuf>,

    /// Refuse grammars that declare one token on several axes.
    #[serde(default)]
    pub reject_token_collisions: bool,

    // =========================================================================
    // Build settings
    // =========================================================================
    /// Output format for `bar build`.
    #[serde(default)]
    pub output: OutputFormat,

    /// Exit with an error when the selection has conflicts.
    #[serde(default)]
    pub fail_on_conflicts: bool,

    /// Print a warning for axes holding more tokens than their soft cap.
    #[serde(default = "default_true")]
    pub warn_soft_caps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grammar_path: None,
            reject_token_collisions: false,
            output: OutputFormat::default(),
            fail_on_conflicts: false,
            warn_soft_caps: true,
        }
    }
}
