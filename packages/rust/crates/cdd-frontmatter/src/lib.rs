#![allow(clippy::doc_markdown)]

//! cdd-frontmatter - Frontmatter parsing for CDD work-item files
//!
//! Work items carry their metadata in a `---` delimited block at the top of
//! `DECISIONS.md`. The format looks like YAML but is a deliberately small
//! line grammar: flat scalars, one-level `[a, b]` arrays and raw multiline
//! text. It is not a YAML implementation.
//!
//! # Architecture
//!
//! ```text
//! cdd-frontmatter/src/
//! ├── lib.rs         # Re-exports (this file)
//! ├── error.rs       # FrontmatterError enum
//! ├── pattern.rs     # Builtin regex compilation
//! ├── value.rs       # Value and ordered Mapping
//! ├── scalar.rs      # Token -> Value coercion
//! ├── line.rs        # Line classification
//! ├── parser.rs      # Delimiter split + block state machine
//! ├── serializer.rs  # Mapping -> block text
//! └── document.rs    # read / get / update on files
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cdd_frontmatter::{parse_frontmatter, serialize_frontmatter};
//!
//! let doc = parse_frontmatter("---\nid: 7\ntags: [auth, ui]\n---\n# Body\n");
//! assert!(doc.has_frontmatter);
//! let block = serialize_frontmatter(&doc.mapping);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod document;
mod error;
mod pattern;
mod serializer;

pub mod line;
pub mod parser;
pub mod scalar;
pub mod value;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use document::{UpdateMode, get_frontmatter, read_frontmatter, update_frontmatter};
pub use error::FrontmatterError;
pub use line::{Line, classify_line};
pub use pattern::compile_regex;
pub use parser::{FrontmatterDocument, parse_block, parse_frontmatter};
pub use scalar::coerce_scalar;
pub use serializer::{serialize_frontmatter, serialize_frontmatter_with_indent};
pub use value::{Mapping, Value};
