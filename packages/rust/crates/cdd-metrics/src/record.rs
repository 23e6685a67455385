//! Per-file metrics extraction.
//!
//! One `DECISIONS.md` becomes one [`WorkItemMetrics`]: frontmatter fields with
//! defaults filled in, plus three derived ratios.

use std::path::Path;
use std::sync::LazyLock;

use cdd_frontmatter::{Mapping, Value, compile_regex, read_frontmatter};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ExtractError;

static PATH_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"[/\\]([0-9]{4})-"));

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Normalized metrics for one work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemMetrics {
    /// Positive work item number.
    pub id: u64,
    /// Title, `"Untitled"` when absent.
    pub title: String,
    /// Work item type, `"unknown"` when absent.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Status, `"unknown"` when absent.
    pub status: String,
    /// Priority, `"medium"` when absent.
    pub priority: String,
    /// Creation date as written.
    pub created: Option<String>,
    /// Last update date as written.
    pub updated: Option<String>,
    /// Number of work sessions.
    #[serde(serialize_with = "serialize_number")]
    pub total_sessions: f64,
    /// Hours spent across sessions.
    #[serde(serialize_with = "serialize_number")]
    pub total_hours: f64,
    /// Minutes spent re-establishing context.
    #[serde(serialize_with = "serialize_number")]
    pub total_reacquisition_minutes: f64,
    /// Completed tasks.
    #[serde(serialize_with = "serialize_number")]
    pub completed_tasks_total: f64,
    /// Planned tasks.
    #[serde(serialize_with = "serialize_number")]
    pub planned_tasks_total: f64,
    /// Planned top-level tasks.
    #[serde(serialize_with = "serialize_number")]
    pub planned_parent_tasks_total: f64,
    /// Tags as a single string.
    pub tags: String,
    /// `completed / planned` as a whole percentage.
    #[serde(serialize_with = "serialize_number")]
    pub completion_percentage: f64,
    /// Reacquisition minutes per session, one decimal.
    #[serde(serialize_with = "serialize_number")]
    pub avg_reacquisition_per_session: f64,
    /// Hours per session, one decimal.
    #[serde(serialize_with = "serialize_number")]
    pub avg_session_duration: f64,
}

impl WorkItemMetrics {
    /// Build a record from a parsed frontmatter mapping.
    ///
    /// The id comes from a `/NNNN-` path segment when present and non-zero,
    /// otherwise from the frontmatter `id` field.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingId`] when neither source yields a
    /// positive integer.
    pub fn from_frontmatter(path: &Path, fm: &Mapping) -> Result<Self, ExtractError> {
        let id = path_work_item_id(path)
            .or_else(|| fm.get("id").and_then(value_to_id))
            .ok_or_else(|| ExtractError::MissingId {
                path: path.to_path_buf(),
            })?;

        let total_sessions = number_field(fm, "total_sessions");
        let total_hours = number_field(fm, "total_hours");
        let total_reacquisition_minutes = number_field(fm, "total_reacquisition_minutes");
        let completed_tasks_total = number_field(fm, "completed_tasks_total");
        let planned_tasks_total = number_field(fm, "planned_tasks_total");

        let completion_percentage = if planned_tasks_total > 0.0 {
            round_half_up(completed_tasks_total / planned_tasks_total * 100.0)
        } else {
            0.0
        };
        let (avg_reacquisition_per_session, avg_session_duration) = if total_sessions > 0.0 {
            (
                round_tenth(total_reacquisition_minutes / total_sessions),
                round_tenth(total_hours / total_sessions),
            )
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            id,
            title: text_field(fm, "title").unwrap_or_else(|| "Untitled".to_string()),
            item_type: text_field(fm, "type").unwrap_or_else(|| "unknown".to_string()),
            status: text_field(fm, "status").unwrap_or_else(|| "unknown".to_string()),
            priority: text_field(fm, "priority").unwrap_or_else(|| "medium".to_string()),
            created: text_field(fm, "created"),
            updated: text_field(fm, "updated"),
            total_sessions,
            total_hours,
            total_reacquisition_minutes,
            completed_tasks_total,
            planned_tasks_total,
            planned_parent_tasks_total: number_field(fm, "planned_parent_tasks_total"),
            tags: text_field(fm, "tags").unwrap_or_default(),
            completion_percentage,
            avg_reacquisition_per_session,
            avg_session_duration,
        })
    }

    /// Id zero-padded to four digits, as used in directory names.
    #[must_use]
    pub fn padded_id(&self) -> String {
        format!("{:04}", self.id)
    }
}

/// Read one work-item file and extract its metrics.
///
/// # Errors
///
/// [`ExtractError::Unreadable`] if the file cannot be read,
/// [`ExtractError::MissingId`] if no id can be resolved.
pub fn extract_metrics(path: &Path) -> Result<WorkItemMetrics, ExtractError> {
    let document = read_frontmatter(path).map_err(|source| ExtractError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    WorkItemMetrics::from_frontmatter(path, &document.mapping)
}

/// Id from a `/NNNN-` path segment (four digits, then a hyphen).
///
/// `0000` is treated as absent.
#[must_use]
pub fn path_work_item_id(path: &Path) -> Option<u64> {
    let path = path.to_string_lossy();
    let caps = PATH_ID_REGEX.captures(&path)?;
    caps.get(1)?.as_str().parse().ok().filter(|id| *id > 0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn value_to_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Integer(n) => u64::try_from(*n).ok(),
        Value::Float(f) if f.is_finite() && *f >= 1.0 => Some(f.trunc() as u64),
        Value::String(s) => {
            let digits: String = s
                .trim_start()
                .trim_start_matches('+')
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn number_field(fm: &Mapping, key: &str) -> f64 {
    let number = match fm.get(key) {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(value) => value.as_f64(),
        None => None,
    };
    number.filter(|f| f.is_finite()).unwrap_or(0.0)
}

fn text_field(fm: &Mapping, key: &str) -> Option<String> {
    match fm.get(key)? {
        Value::Null | Value::Bool(false) | Value::Integer(0) => None,
        Value::Float(f) if *f == 0.0 || f.is_nan() => None,
        Value::String(s) if s.is_empty() => None,
        value => Some(value.to_string()),
    }
}

/// Whole numbers serialize as JSON integers (`2`, not `2.0`).
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation)]
pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Half-up rounding to a whole number.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Half-up rounding to one decimal place.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
