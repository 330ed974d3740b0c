use clap::{ArgAction, Parser};
use collector::{
    env_lookup, resolve_exit, split_silent_flag, Collector, CollectorConfig, ReportFormat,
    BUILD_DIR_VAR, TEST_BUILD_DIR_VAR,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "test-summary")]
#[command(about = "Summarize Unity .testresult files and exit with the failure count")]
#[command(override_usage = "test-summary [--SILENT] [OPTIONS]")]
struct Cli {
    /// Only honoured as the first argument, where it matches in any case
    #[arg(long, hide = true, action = ArgAction::Count)]
    silent: u8,
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Prefix for source paths in failed/ignored test lines
    #[arg(long)]
    root: Option<String>,
    /// Build directory (overrides BUILD_DIR)
    #[arg(long)]
    build_dir: Option<PathBuf>,
    /// Directory holding *.testresult files (overrides TEST_BUILD_DIR)
    #[arg(long)]
    test_build_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (suppress_errors, args) = split_silent_flag(std::env::args_os());

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if suppress_errors && e.use_stderr() => {
            debug!(error = %e, "suppressing argument error");
            return ExitCode::SUCCESS;
        }
        Err(e) => e.exit(),
    };
    if cli.silent > 0 {
        debug!("--silent is only honoured as the first argument");
    }

    let mut config = CollectorConfig::from_lookup(|key| match key {
        BUILD_DIR_VAR => cli
            .build_dir
            .clone()
            .map(PathBuf::into_os_string)
            .or_else(|| env_lookup(key)),
        TEST_BUILD_DIR_VAR => cli
            .test_build_dir
            .clone()
            .map(PathBuf::into_os_string)
            .or_else(|| env_lookup(key)),
        _ => env_lookup(key),
    })
    .with_suppress_errors(suppress_errors)
    .with_format(cli.format);
    if let Some(root) = cli.root {
        config = config.with_root(root);
    }
    debug!(?config, "resolved configuration");

    let exit = resolve_exit(Collector::new(config).run(), suppress_errors);

    if let Some(report) = &exit.stdout {
        print!("{}", report);
    }
    if let Some(message) = &exit.stderr {
        eprintln!("{}", message);
    }

    ExitCode::from(exit.code)
}
