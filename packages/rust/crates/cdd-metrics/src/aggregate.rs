//! Aggregation of per-item metrics into one summary.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::discover::discover_decision_files;
use crate::error::ExtractError;
use crate::record::{WorkItemMetrics, extract_metrics, round_half_up, round_tenth, serialize_number};

/// Run-wide sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsTotals {
    /// Number of work items with a resolvable id.
    pub work_items: usize,
    /// Sum of `total_sessions`.
    #[serde(serialize_with = "serialize_number")]
    pub sessions: f64,
    /// Sum of `total_hours`.
    #[serde(serialize_with = "serialize_number")]
    pub hours: f64,
    /// Sum of `total_reacquisition_minutes`.
    #[serde(serialize_with = "serialize_number")]
    pub reacquisition_minutes: f64,
    /// Sum of `completed_tasks_total`.
    #[serde(serialize_with = "serialize_number")]
    pub completed_tasks: f64,
    /// Sum of `planned_tasks_total`.
    #[serde(serialize_with = "serialize_number")]
    pub planned_tasks: f64,
}

/// Run-wide averages. Ratios round to one decimal, the rate to a whole percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsAverages {
    /// Sessions per work item.
    #[serde(serialize_with = "serialize_number")]
    pub sessions_per_work_item: f64,
    /// Hours per work item.
    #[serde(serialize_with = "serialize_number")]
    pub hours_per_work_item: f64,
    /// Reacquisition minutes per session.
    #[serde(serialize_with = "serialize_number")]
    pub reacquisition_per_session: f64,
    /// Hours per session.
    #[serde(serialize_with = "serialize_number")]
    pub session_duration: f64,
    /// Completed over planned tasks, percent.
    #[serde(serialize_with = "serialize_number")]
    pub completion_rate: f64,
}

/// Immutable result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    /// When the summary was built.
    pub generated_at: DateTime<Utc>,
    /// Sums over all items.
    pub totals: MetricsTotals,
    /// Averages over all items.
    pub averages: MetricsAverages,
    /// Items sorted ascending by id; equal ids keep discovery order.
    pub items: Vec<WorkItemMetrics>,
}

/// Summary plus the files that were skipped on the way.
#[derive(Debug)]
pub struct AggregateRun {
    /// The aggregated summary.
    pub summary: MetricsSummary,
    /// One entry per skipped file, in discovery order.
    pub skipped: Vec<ExtractError>,
}

impl AggregateRun {
    /// Number of items that have at least one recorded session.
    #[must_use]
    pub fn items_with_session_data(&self) -> usize {
        self.summary
            .items
            .iter()
            .filter(|item| item.total_sessions > 0.0)
            .count()
    }
}

/// Discover every `DECISIONS.md` under `root` and aggregate them.
#[must_use]
pub fn collect_metrics(root: &Path) -> AggregateRun {
    tracing::info!(root = %root.display(), "scanning for DECISIONS.md files");
    let files = discover_decision_files(root);
    tracing::info!(count = files.len(), "found work item files");
    aggregate(&files)
}

/// Extract and aggregate the given files.
///
/// A file that cannot be turned into a record is logged, counted in
/// [`AggregateRun::skipped`], and otherwise ignored.
#[must_use]
pub fn aggregate(paths: &[PathBuf]) -> AggregateRun {
    let mut records = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        match extract_metrics(path) {
            Ok(item) => {
                tracing::info!(
                    id = %item.padded_id(),
                    title = %item.title,
                    status = %item.status,
                    "collected work item"
                );
                records.push(item);
            }
            Err(reason) => {
                tracing::warn!(path = %reason.path().display(), "{reason}");
                skipped.push(reason);
            }
        }
    }

    AggregateRun {
        summary: summarize(records),
        skipped,
    }
}

/// Build a summary stamped with the current time.
#[must_use]
pub fn summarize(records: Vec<WorkItemMetrics>) -> MetricsSummary {
    summarize_at(records, Utc::now())
}

/// Build a summary with an explicit timestamp.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_at(mut items: Vec<WorkItemMetrics>, generated_at: DateTime<Utc>) -> MetricsSummary {
    let mut totals = MetricsTotals {
        work_items: items.len(),
        ..MetricsTotals::default()
    };
    for item in &items {
        totals.sessions += item.total_sessions;
        totals.hours += item.total_hours;
        totals.reacquisition_minutes += item.total_reacquisition_minutes;
        totals.completed_tasks += item.completed_tasks_total;
        totals.planned_tasks += item.planned_tasks_total;
    }

    // Stable: duplicate ids stay in discovery order.
    items.sort_by_key(|item| item.id);

    let count = items.len() as f64;
    let per_item = |sum: f64| if items.is_empty() { 0.0 } else { round_tenth(sum / count) };
    let per_session = |sum: f64| {
        if totals.sessions > 0.0 {
            round_tenth(sum / totals.sessions)
        } else {
            0.0
        }
    };

    let averages = MetricsAverages {
        sessions_per_work_item: per_item(totals.sessions),
        hours_per_work_item: per_item(totals.hours),
        reacquisition_per_session: per_session(totals.reacquisition_minutes),
        session_duration: per_session(totals.hours),
        completion_rate: if totals.planned_tasks > 0.0 {
            round_half_up(totals.completed_tasks / totals.planned_tasks * 100.0)
        } else {
            0.0
        },
    };

    MetricsSummary {
        generated_at,
        totals,
        averages,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdd_frontmatter::parse_block;

    fn item(id: u64, block: &str) -> WorkItemMetrics {
        let path = PathBuf::from(format!("/cdd/{id:04}-item/DECISIONS.md"));
        WorkItemMetrics::from_frontmatter(&path, &parse_block(block)).unwrap()
    }

    #[test]
    fn test_empty_run() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.totals, MetricsTotals::default());
        assert_eq!(summary.averages, MetricsAverages::default());
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_sums_and_averages() {
        let summary = summarize(vec![
            item(2, "total_sessions: 3\ntotal_hours: 6\ntotal_reacquisition_minutes: 15\ncompleted_tasks_total: 2\nplanned_tasks_total: 4"),
            item(1, "total_sessions: 1\ntotal_hours: 1.5\ntotal_reacquisition_minutes: 5\ncompleted_tasks_total: 1\nplanned_tasks_total: 2"),
            item(3, "title: not started"),
        ]);

        assert_eq!(summary.totals.work_items, 3);
        assert_eq!(summary.totals.sessions, 4.0);
        assert_eq!(summary.totals.hours, 7.5);
        assert_eq!(summary.totals.reacquisition_minutes, 20.0);
        assert_eq!(summary.totals.completed_tasks, 3.0);
        assert_eq!(summary.totals.planned_tasks, 6.0);

        assert_eq!(summary.averages.sessions_per_work_item, 1.3);
        assert_eq!(summary.averages.hours_per_work_item, 2.5);
        assert_eq!(summary.averages.reacquisition_per_session, 5.0);
        assert_eq!(summary.averages.session_duration, 1.9);
        assert_eq!(summary.averages.completion_rate, 50.0);
    }

    #[test]
    fn test_items_sorted_by_id_stable() {
        let first = item(5, "title: first");
        let second = item(5, "title: second");

        let summary = summarize(vec![item(9, ""), first, item(1, ""), second]);
        let ids: Vec<u64> = summary.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 5, 5, 9]);
        assert_eq!(summary.items[1].title, "first");
        assert_eq!(summary.items[2].title, "second");
    }

    #[test]
    fn test_zero_sessions_zero_ratios() {
        let summary = summarize(vec![item(1, "total_hours: 3\ncompleted_tasks_total: 2")]);
        assert_eq!(summary.averages.session_duration, 0.0);
        assert_eq!(summary.averages.reacquisition_per_session, 0.0);
        assert_eq!(summary.averages.completion_rate, 0.0);
        assert_eq!(summary.averages.hours_per_work_item, 3.0);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = summarize(vec![item(1, "total_sessions: 2")]);
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("generatedAt").is_some());
        assert_eq!(json["totals"]["workItems"], 1);
        assert!(json["averages"].get("sessionsPerWorkItem").is_some());
        assert!(json["items"][0]["total_sessions"].is_i64());
        assert_eq!(json["items"][0]["total_sessions"], 2);
    }

    #[test]
    fn test_summary_json_whole_numbers_are_integers() {
        let summary = summarize(vec![
            item(1, "total_sessions: 3\ntotal_hours: 4\ncompleted_tasks_total: 1\nplanned_tasks_total: 2"),
            item(2, "total_sessions: 1\ntotal_hours: 1.5"),
        ]);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["totals"]["sessions"], serde_json::json!(4));
        assert_eq!(json["totals"]["hours"], serde_json::json!(5.5));
        assert_eq!(json["averages"]["sessionsPerWorkItem"], serde_json::json!(2));
        assert_eq!(json["averages"]["completionRate"], serde_json::json!(50));

        let back: MetricsSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back.totals, summary.totals);
        assert_eq!(back.averages, summary.averages);
    }
}
