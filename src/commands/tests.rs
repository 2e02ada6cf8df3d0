//! Tests for command implementations.

use super::build::{build_warnings, parse_build_args};
use super::catalog::{format_patterns, format_starters};
use super::check::check_grammar;
use super::completion::write_completion;
use super::inspect::{chip_output, format_chip, format_conflicts};
use super::parse::format_parse_result;
use super::shuffle::{shuffle_options, shuffled_selection};
use super::tokens::{axis_counts, build_matcher, format_groups, list_tokens};
use super::*;
use crate::cli::{BuildArgs, CompleteArgs, ListArgs, ShuffleArgs, TokensArgs};
use crate::config::Config;
use crate::exit_codes;
use crate::grammar::{Grammar, get_method_tokens_by_category};
use crate::parser::parse_command;
use crate::render::BuildReport;
use crate::resolver::ChipState;
use crate::shuffle::{DEFAULT_FILL, Stage};
use clap_complete::Shell;
use crate::test_support::{grammar_from, sample_grammar, selection};
use serde_json::json;
use tempfile::TempDir;

fn write_grammar(dir: &TempDir, grammar: &Grammar) -> std::path::PathBuf {
    let path = dir.path().join("grammar.json");
    std::fs::write(&path, serde_json::to_string(grammar).unwrap()).unwrap();
    path
}

fn session_with(dir: &TempDir, config: Config) -> Session {
    let path = write_grammar(dir, &sample_grammar());
    Session::with_config(config, path)
}

fn build_args(tokens: &[&str]) -> BuildArgs {
    BuildArgs {
        tokens: tokens.iter().map(|t| t.to_string()).collect(),
        subject: None,
        addendum: None,
        input: None,
        json: false,
        strict: false,
    }
}

// ============================================================================
// build
// ============================================================================

#[test]
fn test_build_warnings_cover_every_advisory() {
    let grammar = sample_grammar();
    let parsed = parse_command("show full gist wardley plain nonsense", &grammar);
    let report = BuildReport::assemble(&grammar, &parsed);

    let warnings = build_warnings(&report, &Config::default());
    assert_eq!(
        warnings,
        vec![
            "unrecognized token 'nonsense'".to_string(),
            "'wardley' (form) conflicts with 'plain' (channel)".to_string(),
            "axis 'completeness' has 2 tokens (soft cap 1)".to_string(),
        ]
    );
}

#[test]
fn test_build_warnings_soft_caps_can_be_silenced() {
    let grammar = sample_grammar();
    let parsed = parse_command("full gist", &grammar);
    let report = BuildReport::assemble(&grammar, &parsed);

    let config = Config {
        warn_soft_caps: false,
        ..Config::default()
    };
    assert!(build_warnings(&report, &config).is_empty());
}

#[test]
fn test_parse_build_args_flags_override_tokens() {
    let grammar = sample_grammar();
    let mut args = build_args(&["show", "--subject", "\"inline\"", "--addendum", "\"a\""]);
    args.subject = Some("from flag".to_string());

    let parsed = parse_build_args(&grammar, &args, None);
    assert_eq!(parsed.subject, "from flag");
    assert_eq!(parsed.addendum, "a");
    assert_eq!(parsed.selected.get("task"), ["show"]);
}

#[test]
fn test_parse_build_args_input_becomes_subject() {
    let grammar = sample_grammar();
    let mut args = build_args(&["show"]);
    args.addendum = Some("be brief".to_string());

    let parsed = parse_build_args(&grammar, &args, Some("file body".to_string()));
    assert_eq!(parsed.subject, "file body");
    assert_eq!(parsed.addendum, "be brief");
}

#[test]
fn test_cmd_build_succeeds_with_conflicts_by_default() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());

    let result = cmd_build(&session, build_args(&["show", "wardley", "plain"]));
    assert!(result.is_ok());
}

#[test]
fn test_cmd_build_strict_fails_on_conflicts() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());

    let mut args = build_args(&["show", "wardley", "plain"]);
    args.strict = true;

    let err = cmd_build(&session, args).unwrap_err();
    assert!(matches!(err, BarError::Conflicts(_)));
    assert_eq!(err.exit_code(), exit_codes::CONFLICTS_FOUND);
    assert!(err.to_string().contains("wardley"));
}

#[test]
fn test_cmd_build_fail_on_conflicts_config() {
    let dir = TempDir::new().unwrap();
    let session = session_with(
        &dir,
        Config {
            fail_on_conflicts: true,
            ..Config::default()
        },
    );

    let err = cmd_build(&session, build_args(&["wardley", "plain"])).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::CONFLICTS_FOUND);

    // A clean selection still builds.
    assert!(cmd_build(&session, build_args(&["show", "full"])).is_ok());
}

#[test]
fn test_cmd_build_reads_input_file() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());
    let input = dir.path().join("subject.txt");
    std::fs::write(&input, "some subject").unwrap();

    let mut args = build_args(&["show"]);
    args.input = Some(input);
    assert!(cmd_build(&session, args).is_ok());

    let mut missing = build_args(&["show"]);
    missing.input = Some(dir.path().join("missing.txt"));
    let err = cmd_build(&session, missing).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn test_cmd_build_missing_grammar_is_grammar_failure() {
    let dir = TempDir::new().unwrap();
    let session = Session::with_config(Config::default(), dir.path().join("nope.json"));

    let err = cmd_build(&session, build_args(&["show"])).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::GRAMMAR_FAILURE);
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn test_format_parse_result() {
    let grammar = sample_grammar();
    let parsed = parse_command(
        "bar build show full voice=as-programmer bogus --subject \"hi\"",
        &grammar,
    );

    let text = format_parse_result(&parsed);
    assert!(text.starts_with("Selection:\n"));
    assert!(text.contains("  task          show\n"));
    assert!(text.contains("  completeness  full\n"));
    assert!(!text.contains("scope"));
    assert!(text.contains("Persona:\n  voice         as programmer\n"));
    assert!(text.contains("Subject: hi\n"));
    assert!(text.contains("Unrecognized: bogus\n"));
    assert!(text.ends_with("--subject \"hi\"\n"));
}

#[test]
fn test_format_parse_result_empty() {
    let grammar = sample_grammar();
    let parsed = parse_command("", &grammar);

    let text = format_parse_result(&parsed);
    assert!(!text.contains("Persona:"));
    assert!(text.ends_with("Command: bar build\n"));
}

// ============================================================================
// tokens
// ============================================================================

#[test]
fn test_axis_counts_follow_priority() {
    let counts = axis_counts(&sample_grammar());
    let summary: Vec<(&str, usize)> = counts.iter().map(|c| (c.axis.as_str(), c.count)).collect();
    assert_eq!(
        summary,
        vec![
            ("task", 4),
            ("completeness", 2),
            ("scope", 2),
            ("method", 5),
            ("form", 3),
            ("channel", 3),
            ("directional", 1),
            ("voice", 2),
            ("audience", 2),
            ("tone", 2),
            ("intent", 2),
            ("persona", 2),
        ]
    );
}

#[test]
fn test_axis_counts_include_axes_missing_from_priority() {
    let grammar = grammar_from(json!({
        "axes": { "definitions": {
            "extra": { "a": "x" },
            "form": { "faq": "x" }
        }},
        "hierarchy": { "axis_priority": ["form", "scope"] }
    }));

    let counts = axis_counts(&grammar);
    let axes: Vec<&str> = counts.iter().map(|c| c.axis.as_str()).take(3).collect();
    assert_eq!(axes, vec!["task", "form", "extra"]);
}

#[test]
fn test_list_tokens_per_kind() {
    let grammar = sample_grammar();

    let tasks = list_tokens(&grammar, "task").unwrap();
    assert_eq!(tasks.len(), 4);

    let voices = list_tokens(&grammar, "voice").unwrap();
    assert_eq!(voices[0].token, "as designer");

    let intents = list_tokens(&grammar, "intent").unwrap();
    assert_eq!(intents[1].token, "persuade");
    assert_eq!(intents[1].description, "Move the audience toward a decision.");

    let presets = list_tokens(&grammar, "persona").unwrap();
    assert_eq!(presets[0].token, "coach");
    assert_eq!(presets[0].description, "voice=as coach, tone=gently");
}

#[test]
fn test_list_tokens_builtin_axis_without_definitions() {
    let grammar = grammar_from(json!({}));
    assert!(list_tokens(&grammar, "form").unwrap().is_empty());
}

#[test]
fn test_list_tokens_unknown_axis() {
    let err = list_tokens(&sample_grammar(), "flavour").unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert!(err.to_string().contains("flavour"));
}

#[test]
fn test_build_matcher() {
    let matcher = build_matcher("d*, f*").unwrap();
    assert!(matcher.is_match("diagnose"));
    assert!(matcher.is_match("flow"));
    assert!(!matcher.is_match("riff"));

    assert!(build_matcher("[").is_err());
}

#[test]
fn test_format_groups() {
    let groups = get_method_tokens_by_category(&sample_grammar());
    let text = format_groups(&groups);

    assert!(text.starts_with("Reasoning:\n  models"));
    assert!(text.contains("Uncategorized:\n  riff"));
}

#[test]
fn test_cmd_tokens_rejects_by_category_off_method() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());

    let err = cmd_tokens(
        &session,
        TokensArgs {
            axis: Some("form".to_string()),
            pattern: None,
            by_category: true,
            json: false,
        },
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

// ============================================================================
// conflicts and chip
// ============================================================================

#[test]
fn test_describe_conflict_includes_warning() {
    let grammar = sample_grammar();
    let conflicts = find_conflicts_for(&grammar, &[("form", &["faq"]), ("channel", &["shellscript"])]);

    assert_eq!(
        format_conflicts(&conflicts),
        "  'faq' (form) conflicts with 'shellscript' (channel): \
         a script cannot hold question and answer prose\n"
    );
    assert_eq!(format_conflicts(&[]), "No conflicts.\n");
}

fn find_conflicts_for(grammar: &Grammar, pairs: &[(&str, &[&str])]) -> Vec<Conflict> {
    crate::resolver::find_conflicts(grammar, &selection(pairs))
}

#[test]
fn test_chip_output_with_reasons() {
    let grammar = sample_grammar();
    let active = selection(&[("channel", &["shellscript"])]);

    let output = chip_output(&grammar, &active, "task", "sim", false);
    assert_eq!(output.state, Some(ChipState::Cautionary));
    assert_eq!(output.caution_with.len(), 1);
    assert_eq!(output.caution_with[0].0, "shellscript");
    assert_eq!(
        format_chip(&output),
        "task:sim cautionary\n  caution with shellscript: \
         tends to produce thin output; simulation is inherently narrative\n"
    );

    let natural = chip_output(&grammar, &active, "task", "show", false);
    assert_eq!(natural.state, Some(ChipState::Natural));
    assert_eq!(natural.natural_with, vec!["shellscript"]);
}

#[test]
fn test_chip_output_driving_only_has_no_reasons() {
    let grammar = sample_grammar();
    let active = selection(&[("channel", &["shellscript"])]);

    let output = chip_output(&grammar, &active, "task", "sim", true);
    assert_eq!(output.state, Some(ChipState::Cautionary));
    assert!(output.caution_with.is_empty());

    let unlit = chip_output(&grammar, &active, "task", "probe", true);
    assert_eq!(format_chip(&unlit), "task:probe none\n");
}

// ============================================================================
// patterns, starters and check
// ============================================================================

#[test]
fn test_format_catalogs() {
    let grammar = sample_grammar();

    let patterns = format_patterns(&grammar.patterns);
    assert!(patterns.starts_with("Example Pattern\n  A test pattern.\n"));
    assert!(patterns.contains("  $ bar build show mean full plain\n"));

    assert_eq!(
        format_starters(&grammar.starter_packs),
        "debug  Diagnosing a bug or system failure\n       $ bar build probe diagnose full\n"
    );

    assert_eq!(format_patterns(&[]), "No usage patterns.\n");
    assert_eq!(format_starters(&[]), "No starter packs.\n");
}

#[test]
fn test_cmd_patterns_and_starters_run() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());

    assert!(cmd_patterns(&session, ListArgs { json: true }).is_ok());
    assert!(cmd_starters(&session, ListArgs { json: false }).is_ok());
}

#[test]
fn test_check_grammar() {
    assert!(check_grammar(&sample_grammar()).is_empty());

    let grammar = grammar_from(json!({
        "tasks": { "descriptions": { "plan": "x" } },
        "axes": { "definitions": { "form": { "plan": "y" } } },
        "hierarchy": { "axis_incompatibilities": { "form": { "plan": ["ghost"] } } }
    }));
    assert_eq!(
        check_grammar(&grammar),
        vec![
            "token 'plan' is declared on several axes: task, form".to_string(),
            "incompatibility form:plan names unknown token 'ghost'".to_string(),
        ]
    );
}

#[test]
fn test_cmd_check_exit_codes() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());
    assert!(cmd_check(&session).is_ok());

    let bad = TempDir::new().unwrap();
    let path = write_grammar(
        &bad,
        &grammar_from(json!({
            "hierarchy": { "axis_incompatibilities": { "form": { "faq": ["ghost"] } } }
        })),
    );
    let err = cmd_check(&Session::with_config(Config::default(), path)).unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::GRAMMAR_FAILURE);
}

// ============================================================================
// shuffle
// ============================================================================

fn shuffle_args(seed: u64) -> ShuffleArgs {
    ShuffleArgs {
        seed: Some(seed),
        include: Vec::new(),
        exclude: Vec::new(),
        fill: DEFAULT_FILL,
        subject: None,
        json: false,
    }
}

#[test]
fn test_shuffle_options_from_args() {
    let args = ShuffleArgs {
        include: vec!["form".to_string(), "persona_preset".to_string()],
        exclude: vec!["tone".to_string()],
        fill: 0.3,
        ..shuffle_args(9)
    };
    let options = shuffle_options(&args).unwrap();
    assert_eq!(options.seed, 9);
    assert_eq!(options.fill, 0.3);
    assert_eq!(options.include.len(), 2);
    assert_eq!(options.include[1], Stage::Preset);
    assert_eq!(options.exclude.len(), 1);
}

#[test]
fn test_shuffle_options_reject_bad_input() {
    for fill in [-0.1, 1.5, f64::NAN] {
        let args = ShuffleArgs {
            fill,
            ..shuffle_args(1)
        };
        let err = shuffle_options(&args).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    let args = ShuffleArgs {
        include: vec!["colour".to_string()],
        ..shuffle_args(1)
    };
    assert!(shuffle_options(&args).unwrap_err().to_string().contains("colour"));
}

#[test]
fn test_shuffled_selection_is_seeded_and_renders() {
    let grammar = sample_grammar();
    let args = ShuffleArgs {
        exclude: vec!["persona".to_string()],
        fill: 1.0,
        ..shuffle_args(2024)
    };
    let options = shuffle_options(&args).unwrap();

    let first = shuffled_selection(&grammar, &options, Some("the code".to_string()));
    let second = shuffled_selection(&grammar, &options, Some("the code".to_string()));
    assert_eq!(first, second);
    assert_eq!(first.subject, "the code");
    assert!(first.unrecognized.is_empty());

    let report = BuildReport::assemble(&grammar, &first);
    assert!(report.prompt.contains("the code"));
}

#[test]
fn test_cmd_shuffle_runs() {
    let dir = TempDir::new().unwrap();
    let session = session_with(&dir, Config::default());
    assert!(cmd_shuffle(&session, shuffle_args(5)).is_ok());

    let args = ShuffleArgs {
        fill: 2.0,
        ..shuffle_args(5)
    };
    assert!(cmd_shuffle(&session, args).is_err());
}

// ============================================================================
// completion
// ============================================================================

fn script(shell: Shell) -> String {
    let mut out = Vec::new();
    write_completion(shell, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_completion_scripts() {
    let bash = script(Shell::Bash);
    assert!(bash.contains("shuffle"));
    assert!(bash.contains("bar __complete"));
    assert!(bash.contains("complete -F _bar_build_tokens"));

    let fish = script(Shell::Fish);
    assert!(fish.contains("shuffle"));
    assert!(fish.contains("bar __complete"));

    let zsh = script(Shell::Zsh);
    assert!(zsh.contains("#compdef bar"));
    assert!(zsh.contains("shuffle"));
}

#[test]
fn test_cmd_complete_tolerates_missing_grammar() {
    let dir = TempDir::new().unwrap();
    let session = Session::with_config(Config::default(), dir.path().join("missing.json"));
    let args = CompleteArgs {
        words: vec!["sh".to_string()],
    };
    assert!(cmd_complete(Ok(session), args).is_ok());

    let args = CompleteArgs { words: Vec::new() };
    let err = BarError::UserError("no grammar".to_string());
    assert!(cmd_complete(Err(err), args).is_ok());
}
