//! Config loading, discovery and validation.

use super::model::Config;
use super::types::{CONFIG_ENV, CONFIG_FILE_NAME};
use crate::error::{BarError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the bar.yaml file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(BarError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BarError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| BarError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| BarError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `grammar_path`, when set, must not be blank
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.grammar_path
            && path.as_os_str().to_string_lossy().trim().is_empty()
        {
            return Err(BarError::Config(
                "config validation failed: grammar_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Find and load the active config.
    ///
    /// Lookup order: `explicit` (from `--config`), then `BAR_CONFIG`, then
    /// `bar.yaml` in `cwd`. A named file must exist; the implicit
    /// `bar.yaml` is optional and defaults apply without it.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = Self::locate(explicit, cwd) {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }
        Ok(Self::default())
    }

    fn locate(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }
        let implicit = cwd.join(CONFIG_FILE_NAME);
        implicit.is_file().then_some(implicit)
    }
}
