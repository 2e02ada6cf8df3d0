//! Session context resolution for bar.
//!
//! This module is the "environment resolution" layer every command goes
//! through: it finds the active config, decides which grammar document to
//! use and owns the grammar cache for the lifetime of the command.
//!
//! Grammar path lookup order:
//! 1. `--grammar PATH`
//! 2. `BAR_GRAMMAR_PATH`
//! 3. `grammar_path` in the config

use crate::config::Config;
use crate::config::types::GRAMMAR_PATH_ENV;
use crate::error::{BarError, Result};
use crate::grammar::{Grammar, GrammarCache};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Resolved config and grammar source for one command.
#[derive(Debug)]
pub struct Session {
    /// Active configuration (defaults when no config file was found).
    pub config: Config,

    cache: GrammarCache,
}

impl Session {
    /// Resolve the session from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Config loaded and grammar path decided
    /// * `Err(BarError::Config)` - A named config file is missing or invalid
    /// * `Err(BarError::UserError)` - No grammar path is configured anywhere
    pub fn resolve(grammar: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            BarError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(grammar, config, &cwd)
    }

    /// Resolve the session from a specific directory.
    ///
    /// This is useful for testing or when the working directory is known.
    pub fn resolve_from(grammar: Option<&Path>, config: Option<&Path>, cwd: &Path) -> Result<Self> {
        let config = Config::discover(config, cwd)?;
        let grammar_path = resolve_grammar_path(grammar, &config, cwd)?;
        debug!(path = %grammar_path.display(), "using grammar");

        Ok(Self {
            config,
            cache: GrammarCache::new(grammar_path),
        })
    }

    /// Build a session around an explicit config and grammar path.
    pub fn with_config(config: Config, grammar_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            cache: GrammarCache::new(grammar_path),
        }
    }

    /// Path of the grammar document.
    pub fn grammar_path(&self) -> &Path {
        self.cache.path()
    }

    /// The loaded grammar, read on first use.
    ///
    /// With `reject_token_collisions` set, a grammar declaring one token on
    /// several axes is refused.
    pub fn grammar(&self) -> Result<Arc<Grammar>> {
        let grammar = self.cache.get()?;
        if self.config.reject_token_collisions {
            grammar.ensure_no_collisions()?;
        }
        Ok(grammar)
    }
}

/// Decide which grammar document to load. Relative paths are taken from
/// `cwd`.
fn resolve_grammar_path(explicit: Option<&Path>, config: &Config, cwd: &Path) -> Result<PathBuf> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| {
            env::var_os(GRAMMAR_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| config.grammar_path.clone())
        .ok_or_else(|| {
            BarError::UserError(format!(
                "no grammar configured.\n\n\
                 Pass --grammar PATH, set {}, or add `grammar_path` to bar.yaml.",
                GRAMMAR_PATH_ENV
            ))
        })?;

    Ok(if path.is_relative() {
        cwd.join(path)
    } else {
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use serial_test::serial;
    use tempfile::TempDir;

    const GRAMMAR: &str = r#"{"tasks": {"descriptions": {"show": "Show it."}}}"#;

    fn clear_env() {
        // SAFETY: callers are #[serial].
        unsafe {
            env::remove_var(GRAMMAR_PATH_ENV);
            env::remove_var(crate::config::types::CONFIG_ENV);
        }
    }

    #[test]
    #[serial]
    fn explicit_grammar_wins() {
        clear_env();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bar.yaml"), "grammar_path: other.json\n").unwrap();

        let session = Session::resolve_from(Some(Path::new("g.json")), None, dir.path()).unwrap();
        assert_eq!(session.grammar_path(), dir.path().join("g.json"));
    }

    #[test]
    #[serial]
    fn env_beats_config() {
        clear_env();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bar.yaml"), "grammar_path: other.json\n").unwrap();
        unsafe { env::set_var(GRAMMAR_PATH_ENV, "/abs/grammar.json") };

        let session = Session::resolve_from(None, None, dir.path()).unwrap();
        clear_env();

        assert_eq!(session.grammar_path(), Path::new("/abs/grammar.json"));
    }

    #[test]
    #[serial]
    fn config_grammar_path_used_last() {
        clear_env();
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bar.yaml"), "grammar_path: g.json\n").unwrap();

        let session = Session::resolve_from(None, None, dir.path()).unwrap();
        assert_eq!(session.grammar_path(), dir.path().join("g.json"));
    }

    #[test]
    #[serial]
    fn missing_grammar_path_is_user_error() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let err = Session::resolve_from(None, None, dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("--grammar"));
    }

    #[test]
    fn grammar_loads_lazily() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grammar.json");
        let session = Session::with_config(Config::default(), &path);

        let err = session.grammar().unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::GRAMMAR_FAILURE);

        std::fs::write(&path, GRAMMAR).unwrap();
        let grammar = session.grammar().unwrap();
        assert_eq!(grammar.task_description("show"), Some("Show it."));
    }

    #[test]
    fn collisions_rejected_when_configured() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grammar.json");
        std::fs::write(
            &path,
            r#"{"tasks": {"descriptions": {"plan": "x"}},
                "axes": {"definitions": {"form": {"plan": "y"}}}}"#,
        )
        .unwrap();

        let lenient = Session::with_config(Config::default(), &path);
        assert!(lenient.grammar().is_ok());

        let strict = Session::with_config(
            Config {
                reject_token_collisions: true,
                ..Config::default()
            },
            &path,
        );
        let err = strict.grammar().unwrap_err();
        assert!(matches!(err, BarError::Validation(_)));
    }
}
