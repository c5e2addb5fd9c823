use std::path::PathBuf;

use crate::args::{AnalysisOptions, Invocation, USAGE, classify_invocation, parse_cli, resolve_options};
use crate::config::CovmapConfig;
use crate::jacoco::{ExecutionMode, TestCommand};

#[test]
fn single_positional_uses_defaults() {
    let cli = parse_cli(["covmap", "https://example.com/org/proj"]).unwrap();
    let opts = resolve_options(&cli, &CovmapConfig::default()).unwrap();
    assert_eq!(opts, AnalysisOptions::with_defaults("https://example.com/org/proj"));
}

#[test]
fn missing_or_extra_positionals_fail_to_parse() {
    assert!(parse_cli(["covmap"]).is_err());
    assert!(parse_cli(["covmap", "a", "b"]).is_err());
}

fn printed(argv: &[&str]) -> String {
    match classify_invocation(argv.iter().copied()) {
        Invocation::Print(text) => text,
        Invocation::Analyze(cli) => panic!("expected printed output, parsed {cli:?}"),
    }
}

#[test]
fn wrong_positional_count_prints_the_usage_line() {
    let expected = "Usage: covmap <git_repo_url_or_path>\n";
    assert_eq!(format!("{USAGE}\n"), expected);
    assert_eq!(printed(&["covmap"]), expected);
    assert_eq!(printed(&["covmap", "a", "b"]), expected);
    assert_eq!(printed(&["covmap", "repo", "--no-such-flag"]), expected);
}

#[test]
fn help_prints_clap_help_instead_of_usage() {
    let help = printed(&["covmap", "--help"]);
    assert!(help.contains("--test-command"), "{help}");
    assert!(!help.starts_with(USAGE));
}

#[test]
fn single_positional_is_analyzed() {
    match classify_invocation(["covmap", "https://example.com/org/proj"]) {
        Invocation::Analyze(cli) => assert_eq!(cli.repository, "https://example.com/org/proj"),
        Invocation::Print(text) => panic!("unexpected output {text}"),
    }
}

#[test]
fn flags_override_config() {
    let cli = parse_cli([
        "covmap",
        "repo",
        "--report",
        "out.json",
        "--classes-dir",
        "out/a",
        "--classes-dir",
        "out/b",
    ])
    .unwrap();
    let cfg = CovmapConfig {
        report_path: Some("cfg.json".into()),
        exec_data_dir: Some("cfg-exec".into()),
        classes_dirs: Some(vec!["cfg/classes".into()]),
        baseline_ref: Some("develop".into()),
        ..CovmapConfig::default()
    };
    let opts = resolve_options(&cli, &cfg).unwrap();
    assert_eq!(opts.report_path, PathBuf::from("out.json"));
    assert_eq!(opts.exec_data_dir, PathBuf::from("cfg-exec"));
    assert_eq!(opts.classes_dirs, vec!["out/a".to_string(), "out/b".to_string()]);
    assert_eq!(opts.baseline_ref.as_deref(), Some("develop"));
}

#[test]
fn run_tests_requires_a_command() {
    let cli = parse_cli(["covmap", "repo", "--run-tests"]).unwrap();
    assert!(resolve_options(&cli, &CovmapConfig::default()).is_err());

    let cfg = CovmapConfig {
        test_command: Some("mvn -q test -Dtest={class}#{method}".into()),
        ..CovmapConfig::default()
    };
    let opts = resolve_options(&cli, &cfg).unwrap();
    assert_eq!(
        opts.execution,
        ExecutionMode::RunTests(TestCommand::new("mvn -q test -Dtest={class}#{method}"))
    );
}
