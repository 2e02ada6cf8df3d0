//! Grammar loading and memoization.
//!
//! The core never performs I/O; this module is the boundary where a grammar
//! document is read and parsed. `GrammarCache` is owned by whoever owns the
//! session, so there is no process-global grammar.

use super::model::Grammar;
use crate::error::{BarError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

impl Grammar {
    /// Parse a grammar from a JSON document.
    ///
    /// Malformed JSON is reported as a 422 grammar load error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BarError::GrammarLoad {
            status: 422,
            message: format!("malformed grammar JSON: {}", e),
        })
    }

    /// Read and parse a grammar file.
    ///
    /// # Returns
    ///
    /// * `Ok(Grammar)` - Parsed grammar
    /// * `Err(BarError::GrammarLoad)` - 404/403/500 for I/O failures, 422 for bad JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| BarError::grammar_io(path, &e))?;

        let grammar = Self::from_json(&content).map_err(|err| match err {
            BarError::GrammarLoad { status, message } => BarError::GrammarLoad {
                status,
                message: format!("'{}': {}", path.display(), message),
            },
            other => other,
        })?;

        info!(
            path = %path.display(),
            axes = grammar.axes.definitions.len(),
            tasks = grammar.tasks.descriptions.len(),
            "loaded grammar"
        );

        let collisions = grammar.token_collisions();
        for collision in &collisions {
            warn!(
                token = %collision.token,
                axes = ?collision.axes,
                "token declared on several axes; the last axis wins when parsing"
            );
        }

        Ok(grammar)
    }

    /// Fail if any literal token is declared by more than one axis.
    pub fn ensure_no_collisions(&self) -> Result<()> {
        let collisions = self.token_collisions();
        if collisions.is_empty() {
            return Ok(());
        }

        let details: Vec<String> = collisions
            .iter()
            .map(|c| format!("'{}' ({})", c.token, c.axes.join(", ")))
            .collect();
        Err(BarError::Validation(format!(
            "tokens declared on more than one axis: {}",
            details.join("; ")
        )))
    }
}

/// Loads a grammar file once and hands out shared snapshots.
///
/// A failed load is not memoized: the next call retries.
#[derive(Debug)]
pub struct GrammarCache {
    path: PathBuf,
    grammar: OnceLock<Arc<Grammar>>,
}

impl GrammarCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            grammar: OnceLock::new(),
        }
    }

    /// Path this cache loads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a grammar has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.grammar.get().is_some()
    }

    /// Return the memoized grammar, loading it on first use.
    pub fn get(&self) -> Result<Arc<Grammar>> {
        if let Some(grammar) = self.grammar.get() {
            return Ok(Arc::clone(grammar));
        }

        let loaded = Arc::new(Grammar::load(&self.path)?);
        Ok(Arc::clone(self.grammar.get_or_init(|| loaded)))
    }
}
