//! Configuration types and defaults for bar.
//!
//! This module defines enums, constants, and default value functions
//! used by the Config struct.

use serde::{Deserialize, Serialize};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "bar.yaml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BAR_CONFIG";

/// Environment variable naming the grammar document.
pub const GRAMMAR_PATH_ENV: &str = "BAR_GRAMMAR_PATH";

/// How `bar build` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The rendered prompt only (default).
    #[default]
    Text,
    /// The full build report as JSON.
    Json,
}

impl OutputFormat {
    /// Parse an output format from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub(super) fn default_true() -> bool {
    true
}
