use crate::config::{CollectorConfig, ReportFormat};
use crate::discovery::discover_results;
use crate::error::{CollectorError, CollectorResult};
use std::ffi::OsString;
use summary::{render_json, SummaryGenerator, UnityTestSummary};
use tracing::{debug, info, warn};

pub const SILENT_FLAG: &str = "--silent";

/// Result of a successful collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: String,
    pub failures: u64,
}

/// What the process should print and the status it should exit with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub code: u8,
}

pub struct Collector {
    config: CollectorConfig,
    generator: Box<dyn SummaryGenerator>,
}

impl Collector {
    /// Collector backed by the Unity summary generator
    pub fn new(config: CollectorConfig) -> Self {
        let mut generator = UnityTestSummary::new();
        if let Some(root) = &config.root {
            generator = generator.with_root(root.clone());
        }
        Self::with_generator(config, Box::new(generator))
    }

    pub fn with_generator(config: CollectorConfig, generator: Box<dyn SummaryGenerator>) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Discover result files, summarize them and render the report.
    pub fn run(&self) -> CollectorResult<Outcome> {
        let targets = discover_results(&self.config.test_build_dir)?;
        info!(
            dir = %self.config.test_build_dir.display(),
            files = targets.len(),
            generator = self.generator.name(),
            "collecting test results"
        );

        let summary = self.generator.summarize(&targets)?;
        let report = match self.config.format {
            ReportFormat::Text => summary.report(),
            ReportFormat::Json => {
                let mut json = render_json(&summary)?;
                json.push('\n');
                json
            }
        };

        Ok(Outcome {
            report,
            failures: summary.failures(),
        })
    }
}

/// Map a run result onto output and exit status.
///
/// Without suppression the exit code is the failure count, or 1 with a
/// diagnostic when the run failed. With suppression errors are dropped and
/// the exit code is always 0.
pub fn resolve_exit(result: CollectorResult<Outcome>, suppress_errors: bool) -> Exit {
    match result {
        Ok(outcome) => Exit {
            code: if suppress_errors {
                0
            } else {
                exit_code(outcome.failures)
            },
            stdout: Some(outcome.report),
            stderr: None,
        },
        Err(e) if suppress_errors => {
            debug!(error = %e, "suppressing summary error");
            Exit {
                stdout: None,
                stderr: None,
                code: 0,
            }
        }
        Err(e) => Exit {
            stdout: None,
            stderr: Some(format!("Error: {}", e)),
            code: 1,
        },
    }
}

/// Failure counts past 255 would wrap around in the process status, so they
/// saturate instead.
pub fn exit_code(failures: u64) -> u8 {
    u8::try_from(failures).unwrap_or_else(|_| {
        warn!(failures, "failure count exceeds exit status range");
        u8::MAX
    })
}

pub fn is_silent_flag(arg: &str) -> bool {
    arg.eq_ignore_ascii_case(SILENT_FLAG)
}

/// Take `--silent` (any case) off the front of `args`. Only the first
/// argument after the program name counts; later occurrences are left for
/// the CLI parser and do not suppress anything.
pub fn split_silent_flag<I>(args: I) -> (bool, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let silent = args
        .get(1)
        .and_then(|arg| arg.to_str())
        .is_some_and(is_silent_flag);
    if silent {
        args.remove(1);
    }
    (silent, args)
}
