use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::{
    CovmapConfig, DEFAULT_EXEC_DATA_DIR, DEFAULT_REPORT_PATH, DEFAULT_WORKSPACE_DIR,
};
use crate::error::CovmapError;
use crate::jacoco::{ExecutionMode, TestCommand};

pub const USAGE: &str = "Usage: covmap <git_repo_url_or_path>";

#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(
    name = "covmap",
    version,
    about = "Maps each test of a Java repository to the lines it covers",
    override_usage = "covmap [OPTIONS] <REPOSITORY>"
)]
pub struct Cli {
    /// Git URL or local path of the repository to analyze.
    pub repository: String,

    /// Config file (default: covmap.toml, .covmaprc, ... in the current directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory checkouts are cloned into.
    #[arg(long = "workspace-dir")]
    pub workspace_dir: Option<String>,

    /// Directory receiving one execution-data file per test.
    #[arg(long = "exec-data-dir")]
    pub exec_data_dir: Option<String>,

    /// Path of the JSON report.
    #[arg(long = "report")]
    pub report: Option<String>,

    /// Branch, tag or commit restored before each test.
    #[arg(long = "baseline-ref")]
    pub baseline_ref: Option<String>,

    /// Compiled-class root inside the checkout; repeatable.
    #[arg(long = "classes-dir")]
    pub classes_dirs: Vec<String>,

    /// Execute each test with --test-command before collecting coverage.
    #[arg(long = "run-tests")]
    pub run_tests: bool,

    /// Shell template with {test} {class} {method} {exec} {root} placeholders.
    #[arg(long = "test-command")]
    pub test_command: Option<String>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub source: String,
    pub workspace_dir: PathBuf,
    pub exec_data_dir: PathBuf,
    pub report_path: PathBuf,
    pub baseline_ref: Option<String>,
    pub classes_dirs: Vec<String>,
    pub execution: ExecutionMode,
    pub verbose: bool,
}

impl AnalysisOptions {
    pub fn with_defaults(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            workspace_dir: PathBuf::from(DEFAULT_WORKSPACE_DIR),
            exec_data_dir: PathBuf::from(DEFAULT_EXEC_DATA_DIR),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            baseline_ref: None,
            classes_dirs: vec![],
            execution: ExecutionMode::Inspect,
            verbose: false,
        }
    }
}

pub fn parse_cli<I, T>(argv: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(argv)
}

/// What `main` does with its arguments before any analysis starts.
#[derive(Debug)]
pub enum Invocation {
    Analyze(Box<Cli>),
    /// Print the text to stdout and exit successfully.
    Print(String),
}

/// Help and version requests print clap's text. Any other parse failure,
/// including a missing or extra repository argument, prints [`USAGE`].
pub fn classify_invocation<I, T>(argv: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match parse_cli(argv) {
        Ok(cli) => Invocation::Analyze(Box::new(cli)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Print(err.render().to_string())
        }
        Err(_) => Invocation::Print(format!("{USAGE}\n")),
    }
}

/// Command-line values win over config values, which win over defaults.
pub fn resolve_options(cli: &Cli, cfg: &CovmapConfig) -> Result<AnalysisOptions, CovmapError> {
    let pick = |flag: &Option<String>, key: &Option<String>, default: &str| {
        PathBuf::from(
            flag.clone()
                .or_else(|| key.clone())
                .unwrap_or_else(|| default.to_string()),
        )
    };

    let run_tests = cli.run_tests || cfg.run_tests.unwrap_or(false);
    let test_command = cli
        .test_command
        .clone()
        .or_else(|| cfg.test_command.clone());
    let execution = match (run_tests, test_command) {
        (false, _) => ExecutionMode::Inspect,
        (true, Some(template)) if !template.trim().is_empty() => {
            ExecutionMode::RunTests(TestCommand::new(template))
        }
        (true, _) => {
            return Err(CovmapError::InvalidOptions {
                message: "--run-tests needs a --test-command (or testCommand in config)"
                    .to_string(),
            });
        }
    };

    let classes_dirs = if cli.classes_dirs.is_empty() {
        cfg.classes_dirs.clone().unwrap_or_default()
    } else {
        cli.classes_dirs.clone()
    };

    Ok(AnalysisOptions {
        source: cli.repository.clone(),
        workspace_dir: pick(&cli.workspace_dir, &cfg.workspace_dir, DEFAULT_WORKSPACE_DIR),
        exec_data_dir: pick(&cli.exec_data_dir, &cfg.exec_data_dir, DEFAULT_EXEC_DATA_DIR),
        report_path: pick(&cli.report, &cfg.report_path, DEFAULT_REPORT_PATH),
        baseline_ref: cli.baseline_ref.clone().or_else(|| cfg.baseline_ref.clone()),
        classes_dirs,
        execution,
        verbose: cli.verbose || cfg.verbose.unwrap_or(false),
    })
}
