//! cdd-metrics CLI: collect work-item metrics or inspect frontmatter.
//!
//! Settings come from `<PRJ_ROOT>/cdd/.meta/settings.yaml` and
//! `<config home>/cdd/settings.yaml`. Override the config home with `--conf <dir>`.
//!
//! Logging: set `RUST_LOG=cdd_metrics=debug` (or pass `--verbose`) to see logs on stderr.

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cdd_frontmatter::{Mapping, UpdateMode, coerce_scalar, get_frontmatter, update_frontmatter};
use cdd_metrics::{
    AggregateRun, OutputPaths, RuntimeSettings, collect_metrics, load_runtime_settings,
    project_root, round_tenth, write_outputs,
};

use crate::cli::{Cli, Command};

const RULE_WIDTH: usize = 50;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "cdd_metrics=debug,cdd_frontmatter=debug"
        } else {
            "cdd_metrics=info,cdd_frontmatter=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let project_root = project_root();
    let settings = load_runtime_settings(&project_root, cli.conf.as_deref());

    match cli.command {
        Command::Collect {
            root,
            json_out,
            report_out,
            no_write,
        } => run_collect(
            &project_root,
            &settings,
            root,
            json_out,
            report_out,
            no_write,
        ),
        Command::Frontmatter { file, get, set } => run_frontmatter(&file, get, set),
    }
}

fn run_collect(
    project_root: &Path,
    settings: &RuntimeSettings,
    root: Option<PathBuf>,
    json_out: Option<PathBuf>,
    report_out: Option<PathBuf>,
    no_write: bool,
) -> anyhow::Result<()> {
    let root = root.unwrap_or_else(|| settings.metrics.metrics_root(project_root));
    if !root.is_dir() {
        bail!(
            "metrics root not found: {} (run from a project with a cdd/ directory or pass ROOT)",
            root.display()
        );
    }

    println!("CDD Metrics Collection");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();

    let run = collect_metrics(&root);

    if !no_write {
        let paths = resolve_output_paths(project_root, settings, json_out, report_out);
        write_outputs(&run.summary, &paths)
            .with_context(|| format!("writing metrics artifacts under {}", paths.dir.display()))?;
        println!("JSON summary written to: {}", paths.json.display());
        println!("Markdown report written to: {}", paths.report.display());
        println!();
    }

    print_console_summary(&run);
    Ok(())
}

fn resolve_output_paths(
    project_root: &Path,
    settings: &RuntimeSettings,
    json_out: Option<PathBuf>,
    report_out: Option<PathBuf>,
) -> OutputPaths {
    let defaults = settings.metrics.output_paths(project_root);
    let json = json_out.unwrap_or(defaults.json);
    let report = report_out.unwrap_or(defaults.report);
    let dir = json
        .parent()
        .map_or_else(|| defaults.dir.clone(), Path::to_path_buf);
    OutputPaths { dir, json, report }
}

fn print_console_summary(run: &AggregateRun) {
    let totals = &run.summary.totals;
    let averages = &run.summary.averages;

    println!("Summary");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Work Items: {}", totals.work_items);
    println!("Total Sessions: {}", cdd_metrics::format_number(totals.sessions));
    println!(
        "Total Hours: {}",
        cdd_metrics::format_number(round_tenth(totals.hours))
    );
    println!(
        "Avg Reacquisition: {} min/session",
        cdd_metrics::format_number(averages.reacquisition_per_session)
    );
    println!(
        "Completion Rate: {}%",
        cdd_metrics::format_number(averages.completion_rate)
    );
    if !run.skipped.is_empty() {
        println!("Skipped: {} file(s) (see warnings above)", run.skipped.len());
    }
    println!();

    let with_data = run.items_with_session_data();
    if with_data == 0 {
        println!("No work items have session data yet.");
        println!("   Record sessions in DECISIONS.md frontmatter to populate metrics.");
    } else {
        println!("{with_data} work item(s) have session data.");
    }
}

fn run_frontmatter(file: &Path, get: Option<String>, set: Option<Vec<String>>) -> anyhow::Result<()> {
    if let Some(pair) = set {
        let [key, value] = <[String; 2]>::try_from(pair)
            .map_err(|_| anyhow::anyhow!("--set expects exactly KEY and VALUE"))?;
        let mut updates = Mapping::new();
        updates.insert(key.clone(), coerce_scalar(&value));
        update_frontmatter(file, updates, UpdateMode::Merge)
            .with_context(|| format!("updating frontmatter of {}", file.display()))?;
        println!("Updated {key} to {value}");
        return Ok(());
    }

    let mapping = get_frontmatter(file)
        .with_context(|| format!("reading frontmatter of {}", file.display()))?;

    if let Some(key) = get {
        let Some(value) = mapping.get(&key) else {
            bail!("key not found in frontmatter: {key}");
        };
        println!("{value}");
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&mapping).context("encoding frontmatter as JSON")?;
    println!("{json}");
    Ok(())
}
