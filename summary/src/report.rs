//! Report rendering.
//!
//! The text layout matches Unity's own summary tool so that CI log scrapers
//! written against it keep working.

use crate::generator::SummaryResult;
use crate::types::{ResultLine, TestSummary};

const RULE: &str = "--------------------------";

pub fn render_text(summary: &TestSummary) -> String {
    let mut report = String::new();
    let totals = summary.totals;

    if totals.ignored > 0 {
        push_section(&mut report, "UNITY IGNORED TEST SUMMARY");
        report.push_str(&detail_lines(summary, summary.ignore_lines()));
    }

    if totals.failures > 0 {
        push_section(&mut report, "UNITY FAILED TEST SUMMARY");
        report.push_str(&detail_lines(summary, summary.failure_lines()));
    }

    push_section(&mut report, "OVERALL UNITY TEST SUMMARY");
    report.push_str(&format!(
        "{} TOTAL TESTS {} TOTAL FAILURES {} IGNORED\n",
        totals.tests, totals.failures, totals.ignored
    ));
    report.push('\n');

    report
}

pub fn render_json(summary: &TestSummary) -> SummaryResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

fn push_section(report: &mut String, title: &str) {
    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
    report.push_str(title);
    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
}

/// Detail lines, each joined onto the root as `<root>/<line>` when a root is
/// set.
fn detail_lines<'a>(summary: &TestSummary, lines: impl Iterator<Item = &'a ResultLine>) -> String {
    let prefix = summary
        .root
        .as_deref()
        .map(|root| format!("{}/", root.trim_end_matches('/')))
        .unwrap_or_default();
    lines
        .map(|line| format!("{}{}", prefix, line.raw))
        .collect::<Vec<_>>()
        .join("\n")
}
