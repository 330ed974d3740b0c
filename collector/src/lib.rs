pub mod collector;
pub mod config;
pub mod discovery;
pub mod error;

pub use collector::{
    exit_code, is_silent_flag, resolve_exit, split_silent_flag, Collector, Exit, Outcome,
    SILENT_FLAG,
};
pub use config::{env_lookup, CollectorConfig, ReportFormat, BUILD_DIR_VAR, TEST_BUILD_DIR_VAR};
pub use discovery::{discover_results, is_result_name, result_pattern};
pub use error::{CollectorError, CollectorResult};
