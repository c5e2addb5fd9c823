use std::process::ExitCode;

use covmap::args::Invocation;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = match covmap::args::classify_invocation(std::env::args_os()) {
        Invocation::Analyze(cli) => cli,
        Invocation::Print(text) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let loaded = match cli.config.as_deref() {
        Some(path) => covmap::config::load_config_from_path(path),
        None => covmap::config::load_config(&cwd),
    };
    let opts = loaded.and_then(|cfg| covmap::args::resolve_options(&cli, &cfg));
    let opts = match opts {
        Ok(opts) => opts,
        Err(err) => {
            init_tracing(cli.verbose);
            tracing::error!(error = ?err, "covmap: could not start");
            eprintln!("covmap: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(opts.verbose);

    match covmap::run::run_analysis(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "covmap: analysis aborted");
            eprintln!("covmap: {err}");
            ExitCode::FAILURE
        }
    }
}
