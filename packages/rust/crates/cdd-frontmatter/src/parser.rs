//! Frontmatter document parser.
//!
//! A document may start with a block delimited by `---` lines:
//!
//! ```text
//! ---
//! id: 7
//! title: Login flow
//! notes:
//!   free text kept verbatim
//! ---
//! # Body
//! ```
//!
//! The block is parsed by a two-state machine over [`Line`]s:
//!
//! - **normal**: blank and comment lines are skipped. An entry with a value is
//!   coerced and stored. A top-level entry without a value opens a multiline
//!   value. An indented entry without a value opens a nested block, which is
//!   not reconstructed: its lines are dropped.
//! - **multiline**: lines are collected verbatim until the next entry, then
//!   joined with `\n` and stored as a string (never coerced). Blank lines are
//!   dropped; an indented entry without a value is collected as text.
//!
//! Nested maps and block lists are therefore flattened or kept as raw text.
//! This mirrors what existing work-item files rely on and is not a bug to fix
//! here.

use std::sync::LazyLock;

use regex::Regex;

use crate::line::{Line, classify_line};
use crate::pattern::compile_regex;
use crate::scalar::coerce_scalar;
use crate::value::{Mapping, Value};

static FRONTMATTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z"));

/// Result of splitting a file into frontmatter and body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontmatterDocument {
    /// Parsed key/value pairs, in first-seen order.
    pub mapping: Mapping,
    /// Everything after the closing delimiter line.
    pub body: String,
    /// Unparsed text between the delimiters.
    pub raw_block: String,
    /// Whether the text started with a delimited block.
    pub has_frontmatter: bool,
}

/// Split `content` into frontmatter mapping and body.
///
/// Text that does not begin with a `---` line followed later by a closing
/// `---` line is returned whole as the body, with an empty mapping.
#[must_use]
pub fn parse_frontmatter(content: &str) -> FrontmatterDocument {
    let Some(caps) = FRONTMATTER_REGEX.captures(content) else {
        return FrontmatterDocument {
            mapping: Mapping::new(),
            body: content.to_string(),
            raw_block: String::new(),
            has_frontmatter: false,
        };
    };

    let raw_block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    FrontmatterDocument {
        mapping: parse_block(raw_block),
        body: body.to_string(),
        raw_block: raw_block.to_string(),
        has_frontmatter: true,
    }
}

enum State<'a> {
    Normal,
    Multiline { key: &'a str, lines: Vec<&'a str> },
}

/// Parse the text between the delimiters into a mapping.
#[must_use]
pub fn parse_block(block: &str) -> Mapping {
    let mut mapping = Mapping::new();
    let mut state = State::Normal;

    for raw in block.lines() {
        state = step(state, raw, classify_line(raw), &mut mapping);
    }

    if let State::Multiline { key, lines } = state {
        flush(&mut mapping, key, &lines);
    }
    mapping
}

fn step<'a>(state: State<'a>, raw: &'a str, line: Line<'a>, mapping: &mut Mapping) -> State<'a> {
    match (state, line) {
        (State::Normal, Line::Entry { indent, key, value }) => {
            open_entry(indent, key, value, mapping)
        }
        (State::Normal, Line::Blank | Line::Comment | Line::Continuation) => State::Normal,

        (state @ State::Multiline { .. }, Line::Blank) => state,
        (State::Multiline { key, mut lines }, Line::Comment | Line::Continuation) => {
            lines.push(raw);
            State::Multiline { key, lines }
        }
        (State::Multiline { key, mut lines }, Line::Entry { indent, value: "", .. })
            if indent > 0 =>
        {
            lines.push(raw);
            State::Multiline { key, lines }
        }
        (
            State::Multiline {
                key: pending,
                lines,
            },
            Line::Entry { indent, key, value },
        ) => {
            flush(mapping, pending, &lines);
            open_entry(indent, key, value, mapping)
        }
    }
}

fn open_entry<'a>(indent: usize, key: &'a str, value: &str, mapping: &mut Mapping) -> State<'a> {
    if !value.is_empty() {
        mapping.insert(key, coerce_scalar(value));
        return State::Normal;
    }
    if indent > 0 {
        // Nested block under a key we do not reconstruct.
        return State::Normal;
    }
    State::Multiline {
        key,
        lines: Vec::new(),
    }
}

fn flush(mapping: &mut Mapping, key: &str, lines: &[&str]) {
    mapping.insert(key, Value::String(lines.join("\n")));
}
