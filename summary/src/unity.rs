use crate::generator::{SummaryGenerator, SummaryResult};
use crate::parser::parse_result_file;
use crate::types::TestSummary;
use std::path::PathBuf;
use tracing::{debug, info};

/// Summary generator for Unity `.testresult` files
#[derive(Debug, Clone, Default)]
pub struct UnityTestSummary {
    root: Option<String>,
}

impl UnityTestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join failed/ignored detail lines onto `root` as `<root>/<line>`, so
    /// relative source paths in the report resolve from the project root.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        let root = root.into();
        self.root = (!root.is_empty()).then_some(root);
        self
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }
}

impl SummaryGenerator for UnityTestSummary {
    fn summarize(&self, targets: &[PathBuf]) -> SummaryResult<TestSummary> {
        let mut summary = TestSummary::new();
        if let Some(root) = &self.root {
            summary = summary.with_root(root.clone());
        }

        for target in targets {
            debug!(path = %target.display(), "reading result file");
            summary.push(parse_result_file(target)?);
        }

        info!(
            files = summary.files.len(),
            tests = summary.totals.tests,
            failures = summary.totals.failures,
            ignored = summary.totals.ignored,
            "summarized unity test results"
        );

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "unity"
    }
}
