//! Settings loader for cdd-metrics.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/cdd/.meta/settings.yaml`
//! - User overrides:  `<config home>/cdd/settings.yaml`
//!
//! Merge precedence is user over system, field by field.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::output::OutputPaths;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "cdd/.meta/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "cdd/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";

const DEFAULT_METRICS_ROOT: &str = "cdd";
const DEFAULT_OUTPUT_DIR: &str = "cdd/.meta";
const DEFAULT_JSON_FILE: &str = "metrics-summary.json";
const DEFAULT_REPORT_FILE: &str = "metrics-summary.md";

/// Top-level settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    /// `metrics:` section.
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// Where to scan and where to write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsSettings {
    /// Directory scanned for work items.
    pub root: Option<String>,
    /// Directory receiving the summary artifacts.
    pub output_dir: Option<String>,
    /// JSON summary file name inside `output_dir`.
    pub json_file: Option<String>,
    /// Markdown report file name inside `output_dir`.
    pub report_file: Option<String>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            metrics: self.metrics.merge(overlay.metrics),
        }
    }
}

impl MetricsSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            root: overlay.root.or(self.root),
            output_dir: overlay.output_dir.or(self.output_dir),
            json_file: overlay.json_file.or(self.json_file),
            report_file: overlay.report_file.or(self.report_file),
        }
    }

    /// Scan root, absolute against `project_root`.
    #[must_use]
    pub fn metrics_root(&self, project_root: &Path) -> PathBuf {
        let root = non_empty(self.root.as_deref()).unwrap_or(DEFAULT_METRICS_ROOT);
        absolutize(project_root, PathBuf::from(root))
    }

    /// Artifact paths, absolute against `project_root`.
    #[must_use]
    pub fn output_paths(&self, project_root: &Path) -> OutputPaths {
        let dir = non_empty(self.output_dir.as_deref()).unwrap_or(DEFAULT_OUTPUT_DIR);
        let dir = absolutize(project_root, PathBuf::from(dir));
        let json_file = non_empty(self.json_file.as_deref()).unwrap_or(DEFAULT_JSON_FILE);
        let report_file = non_empty(self.report_file.as_deref()).unwrap_or(DEFAULT_REPORT_FILE);
        OutputPaths {
            json: dir.join(json_file),
            report: dir.join(report_file),
            dir,
        }
    }
}

/// Load settings for `project_root`, honouring an optional config-home
/// override (CLI `--conf`).
#[must_use]
pub fn load_runtime_settings(project_root: &Path, conf_override: Option<&Path>) -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths(project_root, conf_override);
    load_runtime_settings_from_paths(&system_path, &user_path)
}

/// System and user settings file locations.
#[must_use]
pub fn runtime_settings_paths(project_root: &Path, conf_override: Option<&Path>) -> (PathBuf, PathBuf) {
    let system_path = project_root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(project_root, conf_override).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
#[must_use]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    if raw.trim().is_empty() {
        return RuntimeSettings::default();
    }
    match serde_yaml::from_str::<RuntimeSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

/// `PRJ_ROOT` when set and non-empty, otherwise the current directory.
#[must_use]
pub fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn resolve_config_home(project_root: &Path, conf_override: Option<&Path>) -> PathBuf {
    if let Some(path) = conf_override
        && !path.as_os_str().is_empty()
    {
        return absolutize(project_root, path.to_path_buf());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
