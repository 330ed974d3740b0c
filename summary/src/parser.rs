//! Parsing of Unity `.testresult` files.
//!
//! A result file is the captured stdout of one Unity test binary:
//!
//! ```text
//! test/test_util.c:10:test_DropCapabilities_ReturnsSuccess:PASS
//! test/test_util.c:14:test_DropCapabilities_should_ClearCaps:FAIL: Expected 0 Was -1
//! test/test_rapl.c:33:test_ReadPower:IGNORE
//!
//! -----------------------
//! 3 Tests 1 Failures 1 Ignored
//! FAIL
//! ```

use crate::generator::{SummaryError, SummaryResult};
use crate::types::{FileResult, ResultLine, TestCounts, TestStatus};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

fn counts_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+) Tests (\d+) Failures (\d+) Ignored").expect("counts pattern is valid")
    })
}

/// Read and parse a result file from disk
pub fn parse_result_file(path: &Path) -> SummaryResult<FileResult> {
    let contents = std::fs::read_to_string(path).map_err(|e| SummaryError::io(path, e))?;
    parse_result_contents(path, &contents)
}

/// Parse the contents of a result file. `path` is only recorded and used in
/// error messages.
pub fn parse_result_contents(path: &Path, contents: &str) -> SummaryResult<FileResult> {
    let lines: Vec<&str> = contents.lines().collect();
    if lines.is_empty() {
        return Err(SummaryError::EmptyResultFile {
            path: path.to_path_buf(),
        });
    }

    let counts = parse_counts(&lines).ok_or_else(|| SummaryError::UnparsableSummary {
        path: path.to_path_buf(),
    })?;

    let mut result = FileResult {
        path: path.to_path_buf(),
        counts,
        failures: Vec::new(),
        ignores: Vec::new(),
        passes: Vec::new(),
    };

    for line in lines.iter().filter_map(|l| ResultLine::parse(l)) {
        trace!(test = %line.test_name, status = line.status.as_str(), "result line");
        match line.status {
            TestStatus::Fail => result.failures.push(line),
            TestStatus::Ignore => result.ignores.push(line),
            TestStatus::Pass => result.passes.push(line),
        }
    }

    debug!(
        path = %path.display(),
        tests = counts.tests,
        failures = counts.failures,
        ignored = counts.ignored,
        "parsed result file"
    );

    Ok(result)
}

/// Counts come from the first `N Tests M Failures K Ignored` line.
fn parse_counts(lines: &[&str]) -> Option<TestCounts> {
    let caps = lines.iter().find_map(|l| counts_pattern().captures(l))?;
    Some(TestCounts::new(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MIXED: &str = "\
test/test_util.c:10:test_ReturnsSuccess:PASS
test/test_util.c:14:test_ClearCaps:FAIL: Expected 0 Was -1
test/test_rapl.c:33:test_ReadPower:IGNORE

-----------------------
3 Tests 1 Failures 1 Ignored
FAIL
";

    #[test]
    fn test_parse_mixed_results() {
        let result = parse_result_contents(Path::new("mixed.testresult"), MIXED).unwrap();
        assert_eq!(result.counts, TestCounts::new(3, 1, 1));
        assert_eq!(result.passes.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.ignores.len(), 1);
        assert_eq!(result.failures[0].test_name, "test_ClearCaps");
        assert_eq!(
            result.failures[0].raw,
            "test/test_util.c:14:test_ClearCaps:FAIL: Expected 0 Was -1"
        );
    }

    #[test]
    fn test_counts_come_from_summary_line() {
        // The counts line is authoritative even when detail lines disagree
        let contents = "a.c:1:test_a:FAIL\n\n2 Tests 2 Failures 0 Ignored\nFAIL\n";
        let result = parse_result_contents(Path::new("x.testresult"), contents).unwrap();
        assert_eq!(result.counts.failures, 2);
        assert_eq!(result.failures.len(), 1);
    }

    #[test]
    fn test_first_counts_line_wins() {
        let contents = "1 Tests 0 Failures 0 Ignored\n5 Tests 5 Failures 0 Ignored\n";
        let result = parse_result_contents(Path::new("x.testresult"), contents).unwrap();
        assert_eq!(result.counts, TestCounts::new(1, 0, 0));
    }

    #[test]
    fn test_crlf_line_endings() {
        let contents = "a.c:1:test_a:IGNORE\r\n1 Tests 0 Failures 1 Ignored\r\nOK\r\n";
        let result = parse_result_contents(Path::new("x.testresult"), contents).unwrap();
        assert_eq!(result.ignores.len(), 1);
        assert_eq!(result.ignores[0].raw, "a.c:1:test_a:IGNORE");
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = parse_result_contents(Path::new("empty.testresult"), "").unwrap_err();
        assert!(matches!(err, SummaryError::EmptyResultFile { .. }));
    }

    #[test]
    fn test_missing_counts_line_is_an_error() {
        let contents = "a.c:1:test_a:PASS\nSegmentation fault\n";
        let err = parse_result_contents(Path::new("crash.testresult"), contents).unwrap_err();
        assert!(matches!(err, SummaryError::UnparsableSummary { .. }));
        assert!(err.to_string().contains("crash.testresult"));
    }

    #[test]
    fn test_parse_result_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MIXED.as_bytes()).unwrap();

        let result = parse_result_file(file.path()).unwrap();
        assert_eq!(result.path, file.path());
        assert_eq!(result.counts.tests, 3);
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_result_file(&dir.path().join("nope.testresult")).unwrap_err();
        assert!(matches!(err, SummaryError::Io { .. }));
    }
}
