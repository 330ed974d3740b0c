use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const BUILD_DIR_VAR: &str = "BUILD_DIR";
pub const TEST_BUILD_DIR_VAR: &str = "TEST_BUILD_DIR";
pub const DEFAULT_BUILD_DIR: &str = "./build";
pub const RESULT_EXTENSION: &str = "testresult";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Unity-style text summary
    #[default]
    Text,
    /// Serialized summary for CI tooling
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    pub build_dir: PathBuf,
    pub test_build_dir: PathBuf,
    /// Swallow generation errors and always exit 0
    pub suppress_errors: bool,
    pub format: ReportFormat,
    pub root: Option<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        let build_dir = PathBuf::from(DEFAULT_BUILD_DIR);
        Self {
            test_build_dir: test_dir_under(&build_dir),
            build_dir,
            suppress_errors: false,
            format: ReportFormat::Text,
            root: None,
        }
    }
}

/// Raw value of an environment variable. Values that are not valid UTF-8
/// are kept as-is since they still name real directories.
pub fn env_lookup(key: &str) -> Option<OsString> {
    std::env::var_os(key)
}

/// `<build_dir>/test`. An empty build dir joins like a string path and
/// gives `/test`.
fn test_dir_under(build_dir: &Path) -> PathBuf {
    if build_dir.as_os_str().is_empty() {
        PathBuf::from("/test")
    } else {
        build_dir.join("test")
    }
}

impl CollectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `BUILD_DIR` and `TEST_BUILD_DIR` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Resolve directories through `lookup`. `TEST_BUILD_DIR` defaults to
    /// `<BUILD_DIR>/test`. Set but empty values are taken as given.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let build_dir = lookup(BUILD_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
        let test_build_dir = lookup(TEST_BUILD_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| test_dir_under(&build_dir));

        Self {
            build_dir,
            test_build_dir,
            ..Self::default()
        }
    }

    /// Override the build directory. The test build directory follows it
    /// unless it is set explicitly afterwards.
    pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = build_dir.into();
        self.test_build_dir = test_dir_under(&self.build_dir);
        self
    }

    pub fn with_test_build_dir(mut self, test_build_dir: impl Into<PathBuf>) -> Self {
        self.test_build_dir = test_build_dir.into();
        self
    }

    pub fn with_suppress_errors(mut self, suppress_errors: bool) -> Self {
        self.suppress_errors = suppress_errors;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }
}
