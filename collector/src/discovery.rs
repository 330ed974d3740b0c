use crate::config::RESULT_EXTENSION;
use crate::error::{CollectorError, CollectorResult};
use glob::{MatchOptions, Pattern};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Name pattern for result files
pub fn result_pattern() -> &'static Pattern {
    static PATTERN: OnceLock<Pattern> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Pattern::new(&format!("*.{}", RESULT_EXTENSION)).expect("result pattern is valid")
    })
}

/// Whether `name` is a result file name. Like a shell glob, `*` does not
/// match a leading dot.
pub fn is_result_name(name: &Path) -> bool {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    result_pattern().matches_path_with(name, options)
}

/// List `*.testresult` files directly under `dir`, sorted by name.
///
/// The directory is listed by its raw OS path, so names that are not valid
/// UTF-8 still resolve. An empty path lists `/`, the way `"#{dir}/*"` would.
/// A missing directory yields an empty set rather than an error; the report
/// then shows zero tests.
pub fn discover_results(dir: &Path) -> CollectorResult<Vec<PathBuf>> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new("/")
    } else {
        dir
    };
    debug!(dir = %dir.display(), pattern = %result_pattern(), "discovering result files");

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "test build directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(discovery_error(dir, e)),
    };

    let mut results = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| discovery_error(dir, e))?;
        if !is_result_name(Path::new(&entry.file_name())) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            results.push(path);
        }
    }
    results.sort();

    debug!(count = results.len(), "discovered result files");
    Ok(results)
}

fn discovery_error(dir: &Path, e: std::io::Error) -> CollectorError {
    CollectorError::Discovery {
        pattern: dir.join(result_pattern().as_str()).display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_result_names() {
        assert_eq!(result_pattern().as_str(), "*.testresult");
        assert!(is_result_name(Path::new("test_rapl.testresult")));
        assert!(!is_result_name(Path::new("test_rapl.testpass")));
        assert!(!is_result_name(Path::new("test_rapl.testresult.bak")));
        assert!(!is_result_name(Path::new(".hidden.testresult")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.testresult"), "").unwrap();
        fs::write(dir.path().join("a.testresult"), "").unwrap();
        fs::write(dir.path().join("a.testpass"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.testresult"), "").unwrap();

        let found = discover_results(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.testresult", "b.testresult"]);
    }

    #[test]
    fn test_directory_named_like_result_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("odd.testresult")).unwrap();

        assert!(discover_results(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = discover_results(&dir.path().join("does-not-exist")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_directory_with_glob_characters() {
        let dir = tempfile::tempdir().unwrap();
        let odd = dir.path().join("build[x]*");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("a.testresult"), "").unwrap();

        assert_eq!(discover_results(&odd).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directory() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let odd = dir.path().join(std::ffi::OsStr::from_bytes(b"bd\xff"));
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("b.testresult"), "").unwrap();

        let found = discover_results(&odd).unwrap();
        assert_eq!(found, vec![odd.join("b.testresult")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_path_is_a_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        let err = discover_results(&file).unwrap_err();
        assert!(matches!(err, CollectorError::Discovery { .. }));
    }
}
