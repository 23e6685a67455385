#![allow(clippy::doc_markdown)]

//! cdd-metrics - Work-item metrics for CDD projects
//!
//! Finds every `DECISIONS.md` under a project, turns each file's frontmatter
//! into a [`WorkItemMetrics`] record and folds the records into one
//! [`MetricsSummary`], which can be written as JSON and as a markdown report.
//!
//! # Architecture
//!
//! ```text
//! cdd-metrics/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # ExtractError, OutputError
//! ├── discover.rs   # Directory walk for DECISIONS.md
//! ├── record.rs     # Per-file extraction and rounding helpers
//! ├── aggregate.rs  # Totals, averages, sorted items
//! ├── report.rs     # Markdown rendering
//! ├── output.rs     # Artifact writer
//! ├── settings.rs   # YAML settings (system + user)
//! ├── cli.rs        # clap definitions (binary only)
//! └── main.rs       # cdd-metrics binary
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;

pub mod aggregate;
pub mod discover;
pub mod output;
pub mod record;
pub mod report;
pub mod settings;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use aggregate::{
    AggregateRun, MetricsAverages, MetricsSummary, MetricsTotals, aggregate, collect_metrics,
    summarize, summarize_at,
};
pub use discover::{
    DECISIONS_FILE_NAME, DEPENDENCY_CACHE_DIR, discover_decision_files, discover_files,
};
pub use error::{ExtractError, OutputError};
pub use output::{OutputPaths, write_outputs};
pub use record::{WorkItemMetrics, extract_metrics, path_work_item_id, round_half_up, round_tenth};
pub use report::{format_number, render_report};
pub use settings::{
    MetricsSettings, RuntimeSettings, load_runtime_settings, project_root, runtime_settings_paths,
};
