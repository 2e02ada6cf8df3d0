//! Tests for config functionality.

use crate::config::types::{CONFIG_ENV, CONFIG_FILE_NAME};
use crate::config::{Config, OutputFormat};
use crate::error::BarError;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.grammar_path, None);
    assert!(!config.reject_token_collisions);
    assert_eq!(config.output, OutputFormat::Text);
    assert!(!config.fail_on_conflicts);
    assert!(config.warn_soft_caps);
}

#[test]
fn test_parse_minimal_yaml() {
    let yaml = "";
    let config = Config::from_yaml(yaml).unwrap();

    // Should use all defaults
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
output: json
fail_on_conflicts: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    // Specified values should be used
    assert_eq!(config.output, OutputFormat::Json);
    assert!(config.fail_on_conflicts);

    // Unspecified values should use defaults
    assert!(config.warn_soft_caps);
    assert_eq!(config.grammar_path, None);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
grammar_path: build/prompt-grammar.json
reject_token_collisions: true
output: text
fail_on_conflicts: true
warn_soft_caps: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(
        config.grammar_path,
        Some(PathBuf::from("build/prompt-grammar.json"))
    );
    assert!(config.reject_token_collisions);
    assert_eq!(config.output, OutputFormat::Text);
    assert!(config.fail_on_conflicts);
    assert!(!config.warn_soft_caps);
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
output: json
some_future_field: true
nested:
  deeper: 1
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_invalid_output_format() {
    let result = Config::from_yaml("output: html\n");
    assert!(matches!(result, Err(BarError::Config(_))));
}

#[test]
fn test_validation_blank_grammar_path() {
    let result = Config::from_yaml("grammar_path: \"  \"\n");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("grammar_path must not be empty"));
    assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
}

#[test]
fn test_output_format_from_str() {
    assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Text));
    assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
    assert_eq!(OutputFormat::from_str("yaml"), None);
}

#[test]
fn test_to_yaml() {
    let config = Config {
        grammar_path: Some(PathBuf::from("grammar.json")),
        output: OutputFormat::Json,
        ..Config::default()
    };
    let yaml = config.to_yaml().unwrap();

    // Should be valid YAML that can be parsed back
    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "output: json").unwrap();
    writeln!(file, "warn_soft_caps: false").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.output, OutputFormat::Json);
    assert!(!config.warn_soft_caps);
}

#[test]
fn test_config_load_missing_file() {
    let result = Config::load("/nonexistent/path/bar.yaml");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

// ============================================================================
// Discovery
// ============================================================================

fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn test_discover_defaults_without_files() {
    let dir = TempDir::new().unwrap();
    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::remove_var(CONFIG_ENV) };

    let config = Config::discover(None, dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_discover_implicit_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), CONFIG_FILE_NAME, "output: json\n");
    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::remove_var(CONFIG_ENV) };

    let config = Config::discover(None, dir.path()).unwrap();
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
#[serial]
fn test_discover_env_beats_implicit_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), CONFIG_FILE_NAME, "output: json\n");
    let env_path = write_config(dir.path(), "other.yaml", "fail_on_conflicts: true\n");
    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var(CONFIG_ENV, &env_path) };

    let config = Config::discover(None, dir.path()).unwrap();
    unsafe { std::env::remove_var(CONFIG_ENV) };

    assert!(config.fail_on_conflicts);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
#[serial]
fn test_discover_explicit_beats_env() {
    let dir = TempDir::new().unwrap();
    let env_path = write_config(dir.path(), "env.yaml", "output: json\n");
    let explicit = write_config(dir.path(), "explicit.yaml", "warn_soft_caps: false\n");
    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var(CONFIG_ENV, &env_path) };

    let config = Config::discover(Some(&explicit), dir.path()).unwrap();
    unsafe { std::env::remove_var(CONFIG_ENV) };

    assert!(!config.warn_soft_caps);
    assert_eq!(config.output, OutputFormat::Text);
}

#[test]
#[serial]
fn test_discover_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let result = Config::discover(Some(&missing), dir.path());
    assert!(matches!(result, Err(BarError::Config(_))));
}
