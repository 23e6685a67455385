use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cdd-metrics")]
#[command(about = "Collect work-item metrics from DECISIONS.md files and inspect their frontmatter.")]
pub(crate) struct Cli {
    /// Override config directory (user settings live at `<DIR>/cdd/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug-level logging on stderr (ignored when RUST_LOG is set).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Scan for DECISIONS.md files, aggregate metrics and write the summary artifacts.
    Collect {
        /// Directory to scan (default: `metrics.root` from settings, else `cdd`)
        root: Option<PathBuf>,

        /// JSON summary path (default: `<output_dir>/<json_file>` from settings)
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Markdown report path (default: `<output_dir>/<report_file>` from settings)
        #[arg(long)]
        report_out: Option<PathBuf>,

        /// Print the console summary only; write no files.
        #[arg(long)]
        no_write: bool,
    },
    /// Print a file's frontmatter as JSON, read one key, or set one key.
    Frontmatter {
        /// Markdown file with a `---` delimited block
        file: PathBuf,

        /// Print only this key's value
        #[arg(long, conflicts_with = "set")]
        get: Option<String>,

        /// Set KEY to VALUE (VALUE is coerced like a frontmatter token)
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
    },
}
