use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::path::PathBuf;

/// Outcome of a single Unity test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Ignore,
}

impl TestStatus {
    /// Match the status field Unity writes after the test name
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "PASS" => Some(TestStatus::Pass),
            "FAIL" => Some(TestStatus::Fail),
            "IGNORE" => Some(TestStatus::Ignore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Ignore => "IGNORE",
        }
    }
}

/// A `file:line:test:STATUS[:message]` detail line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    pub source_file: String,
    pub source_line: String,
    pub test_name: String,
    pub status: TestStatus,
    /// The line exactly as Unity wrote it
    pub raw: String,
}

impl ResultLine {
    /// Returns `None` for lines that are not test outcomes (banners,
    /// separators, the counts line, printf noise from the test binary).
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split(':');
        let source_file = fields.next()?;
        let source_line = fields.next()?;
        let test_name = fields.next()?;
        let status = TestStatus::from_field(fields.next()?)?;

        Some(Self {
            source_file: source_file.to_string(),
            source_line: source_line.to_string(),
            test_name: test_name.to_string(),
            status,
            raw: line.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    pub tests: u64,
    pub failures: u64,
    pub ignored: u64,
}

impl TestCounts {
    pub fn new(tests: u64, failures: u64, ignored: u64) -> Self {
        Self {
            tests,
            failures,
            ignored,
        }
    }

    pub fn passed(&self) -> u64 {
        self.tests.saturating_sub(self.failures + self.ignored)
    }
}

impl AddAssign for TestCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.tests += rhs.tests;
        self.failures += rhs.failures;
        self.ignored += rhs.ignored;
    }
}

/// Parsed contents of one `.testresult` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub counts: TestCounts,
    pub failures: Vec<ResultLine>,
    pub ignores: Vec<ResultLine>,
    pub passes: Vec<ResultLine>,
}

/// Aggregate over every result file handed to a generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub files: Vec<FileResult>,
    pub totals: TestCounts,
    /// Directory joined in front of failed/ignored detail lines when rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn push(&mut self, file: FileResult) {
        self.totals += file.counts;
        self.files.push(file);
    }

    /// Number of failing tests across all files
    pub fn failures(&self) -> u64 {
        self.totals.failures
    }

    pub fn is_success(&self) -> bool {
        self.totals.failures == 0
    }

    pub fn failure_lines(&self) -> impl Iterator<Item = &ResultLine> {
        self.files.iter().flat_map(|f| f.failures.iter())
    }

    pub fn ignore_lines(&self) -> impl Iterator<Item = &ResultLine> {
        self.files.iter().flat_map(|f| f.ignores.iter())
    }

    /// Human-readable report, see [`crate::report::render_text`]
    pub fn report(&self) -> String {
        crate::report::render_text(self)
    }
}
