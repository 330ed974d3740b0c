use crate::types::TestSummary;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Failed to read test result file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty test result file: {}", .path.display())]
    EmptyResultFile { path: PathBuf },

    #[error("Couldn't parse test results: {}", .path.display())]
    UnparsableSummary { path: PathBuf },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SummaryError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        SummaryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type SummaryResult<T> = Result<T, SummaryError>;

/// Turns a set of result files into a report and a failure count.
///
/// The collector only relies on [`TestSummary::report`] and
/// [`TestSummary::failures`]; how the files are read is up to the
/// implementation.
pub trait SummaryGenerator {
    fn summarize(&self, targets: &[PathBuf]) -> SummaryResult<TestSummary>;

    fn name(&self) -> &'static str;
}
