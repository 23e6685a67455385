//! Error types for frontmatter file operations.
//!
//! Parsing and serialization are total; only the file-backed operations fail.

use thiserror::Error;

/// Error types for reading and rewriting frontmatter files.
#[derive(Error, Debug)]
pub enum FrontmatterError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
