//! Summary artifacts on disk: pretty JSON plus the markdown report.

use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::MetricsSummary;
use crate::error::OutputError;
use crate::report::render_report;

/// Where the artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Directory created before writing.
    pub dir: PathBuf,
    /// JSON summary.
    pub json: PathBuf,
    /// Markdown report.
    pub report: PathBuf,
}

/// Write the JSON summary and the markdown report.
///
/// Each file is replaced wholesale; the pair is not written atomically.
///
/// # Errors
///
/// [`OutputError::Write`] when a directory or file cannot be written,
/// [`OutputError::Encode`] if the summary fails to serialize.
pub fn write_outputs(summary: &MetricsSummary, paths: &OutputPaths) -> Result<(), OutputError> {
    create_dir(&paths.dir)?;

    let json = serde_json::to_string_pretty(summary)?;
    write_file(&paths.json, &json)?;
    write_file(&paths.report, &render_report(summary))?;

    tracing::info!(
        json = %paths.json.display(),
        report = %paths.report.display(),
        "wrote metrics artifacts"
    );
    Ok(())
}

fn create_dir(dir: &Path) -> Result<(), OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use tempfile::TempDir;

    #[test]
    fn test_writes_both_artifacts() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out/.meta");
        let paths = OutputPaths {
            json: dir.join("summary.json"),
            report: dir.join("summary.md"),
            dir,
        };

        write_outputs(&summarize(Vec::new()), &paths).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json["totals"]["workItems"], 0);
        let report = fs::read_to_string(&paths.report).unwrap();
        assert!(report.starts_with("# Metrics Summary Report"));
    }

    #[test]
    fn test_unwritable_target_reports_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let paths = OutputPaths {
            dir: blocker.join("sub"),
            json: blocker.join("sub/a.json"),
            report: blocker.join("sub/a.md"),
        };

        let err = write_outputs(&summarize(Vec::new()), &paths).unwrap_err();
        assert!(matches!(err, OutputError::Write { ref path, .. } if path == &blocker.join("sub")));
    }
}
