pub mod generator;
pub mod parser;
pub mod report;
pub mod types;
pub mod unity;

pub use generator::{SummaryError, SummaryGenerator, SummaryResult};
pub use parser::{parse_result_contents, parse_result_file};
pub use report::{render_json, render_text};
pub use types::{FileResult, ResultLine, TestCounts, TestStatus, TestSummary};
pub use unity::UnityTestSummary;
