//! Work-item file discovery.
//!
//! Walks a directory tree depth-first and collects every file with a given
//! name. Hidden directories and the dependency cache are never entered.
//! The walk keeps its own stack of open directory iterators instead of
//! recursing, so deep trees cannot exhaust the call stack.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// File name that marks a work item.
pub const DECISIONS_FILE_NAME: &str = "DECISIONS.md";

/// Dependency cache directory that is never descended into.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Discover all `DECISIONS.md` files under `root`.
#[must_use]
pub fn discover_decision_files(root: &Path) -> Vec<PathBuf> {
    discover_files(root, DECISIONS_FILE_NAME)
}

/// Discover files named exactly `file_name` under `root`.
///
/// Paths are absolute and returned in traversal order (pre-order, directory
/// listing order within a directory; no sorting). A missing or unreadable
/// root yields an empty list.
#[must_use]
pub fn discover_files(root: &Path, file_name: &str) -> Vec<PathBuf> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    let mut found = Vec::new();

    let Ok(entries) = fs::read_dir(&root) else {
        tracing::debug!(root = %root.display(), "discovery root not readable; nothing to scan");
        return found;
    };

    let mut stack = vec![entries];
    while let Some(entries) = stack.last_mut() {
        let Some(entry) = entries.next() else {
            stack.pop();
            continue;
        };
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        let name = entry.file_name();
        let path = entry.path();

        if file_type.is_dir() {
            if should_skip_dir(&name) {
                tracing::trace!(dir = %path.display(), "pruned");
                continue;
            }
            match fs::read_dir(&path) {
                Ok(children) => stack.push(children),
                Err(error) => {
                    tracing::warn!(dir = %path.display(), error = %error, "cannot read directory; skipping");
                }
            }
        } else if name.as_os_str() == OsStr::new(file_name) {
            found.push(path);
        }
    }

    found
}

/// Hidden directories and the dependency cache are pruned.
#[must_use]
pub fn should_skip_dir(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name == DEPENDENCY_CACHE_DIR
}
