//! Error types for metrics extraction and artifact output.

use std::path::PathBuf;

use cdd_frontmatter::FrontmatterError;
use thiserror::Error;

/// Why a single work-item file was left out of an aggregation run.
///
/// Extraction failures are local to one file: the aggregator records them
/// and moves on.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Neither the path nor the frontmatter yields a positive integer id.
    #[error("Skipping {}: no valid ID found", path.display())]
    MissingId {
        /// Offending file.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("Error processing {}: {source}", path.display())]
    Unreadable {
        /// Offending file.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: FrontmatterError,
    },
}

impl ExtractError {
    /// File the failure belongs to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::MissingId { path } | Self::Unreadable { path, .. } => path,
        }
    }
}

/// Failures while writing the summary artifacts.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Output directory or file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Summary could not be encoded as JSON.
    #[error("Failed to encode metrics summary: {0}")]
    Encode(#[from] serde_json::Error),
}
