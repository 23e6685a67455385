//! File-backed frontmatter operations.
//!
//! Updates are a plain read-modify-write: no temporary file, no rename, no
//! locking. Callers must serialize access to a given file themselves.

use std::fs;
use std::path::Path;

use crate::error::FrontmatterError;
use crate::parser::{FrontmatterDocument, parse_frontmatter};
use crate::serializer::serialize_frontmatter;
use crate::value::Mapping;

/// How [`update_frontmatter`] combines the updates with the existing mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Shallow merge; updated keys win, untouched keys are kept.
    #[default]
    Merge,
    /// Drop the existing mapping and write only the updates.
    Replace,
}

/// Read a file and split it into frontmatter and body.
///
/// # Errors
///
/// Returns [`FrontmatterError::NotFound`] if the path does not exist and
/// [`FrontmatterError::Io`] if it cannot be read as UTF-8 text.
pub fn read_frontmatter<P: AsRef<Path>>(path: P) -> Result<FrontmatterDocument, FrontmatterError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FrontmatterError::NotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(parse_frontmatter(&content))
}

/// Read only the frontmatter mapping of a file.
///
/// # Errors
///
/// Same as [`read_frontmatter`].
pub fn get_frontmatter<P: AsRef<Path>>(path: P) -> Result<Mapping, FrontmatterError> {
    read_frontmatter(path).map(|doc| doc.mapping)
}

/// Merge or replace a file's frontmatter and rewrite the file in place.
///
/// The file is reassembled as `---\n<block>\n---\n\n<body>`, with the body
/// written exactly as it followed the old closing delimiter.
///
/// Returns the mapping that was written.
///
/// # Errors
///
/// Returns [`FrontmatterError::NotFound`] if the file is missing, or
/// [`FrontmatterError::Io`] if reading or writing fails.
pub fn update_frontmatter<P: AsRef<Path>>(
    path: P,
    updates: Mapping,
    mode: UpdateMode,
) -> Result<Mapping, FrontmatterError> {
    let path = path.as_ref();
    let FrontmatterDocument { mapping, body, .. } = read_frontmatter(path)?;

    let next = match mode {
        UpdateMode::Merge => {
            let mut merged = mapping;
            merged.merge(updates);
            merged
        }
        UpdateMode::Replace => updates,
    };

    let block = serialize_frontmatter(&next);
    fs::write(path, format!("---\n{block}\n---\n\n{body}"))?;

    tracing::debug!(path = %path.display(), keys = next.len(), ?mode, "frontmatter rewritten");
    Ok(next)
}
