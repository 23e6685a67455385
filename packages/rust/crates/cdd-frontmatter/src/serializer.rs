//! Render a [`Mapping`] back into frontmatter block text.
//!
//! One line per key, in mapping order:
//!
//! | value            | output                             |
//! |------------------|------------------------------------|
//! | null             | `key:`                             |
//! | nested mapping   | `key:` then children at indent + 2 |
//! | array            | `key: [a, b, c]`                   |
//! | string needing quotes | `key: "text"` (no escaping)   |
//! | anything else    | `key: text`                        |
//!
//! A string needs quotes when it contains `:`, `#` or a newline, or when its
//! plain form would coerce back into something other than the same string
//! (`"true"`, `"12"`, `""`, `"[x]"`, ...). Output is semantically faithful for
//! scalars and flat arrays only; multiline strings and nested mappings do not
//! survive a reparse.

use crate::scalar::{coerce_element, coerce_scalar};
use crate::value::{Mapping, Value};

/// Serialize a mapping at indent 0.
#[must_use]
pub fn serialize_frontmatter(mapping: &Mapping) -> String {
    serialize_frontmatter_with_indent(mapping, 0)
}

/// Serialize a mapping with every line prefixed by `indent` spaces.
#[must_use]
pub fn serialize_frontmatter_with_indent(mapping: &Mapping, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut lines = Vec::with_capacity(mapping.len());

    for (key, value) in mapping.iter() {
        match value {
            Value::Null => lines.push(format!("{pad}{key}:")),
            Value::Map(nested) => {
                lines.push(format!("{pad}{key}:"));
                if !nested.is_empty() {
                    lines.push(serialize_frontmatter_with_indent(nested, indent + 2));
                }
            }
            Value::Array(items) => {
                let rendered: Vec<String> = items.iter().map(render_element).collect();
                lines.push(format!("{pad}{key}: [{}]", rendered.join(", ")));
            }
            Value::String(text) if needs_quotes(text) => {
                lines.push(format!("{pad}{key}: \"{text}\""));
            }
            other => lines.push(format!("{pad}{key}: {}", render_scalar(other))),
        }
    }

    lines.join("\n")
}

fn needs_quotes(text: &str) -> bool {
    text.contains([':', '#', '\n']) || coerce_scalar(text).as_str() != Some(text)
}

/// Text form of a scalar. Integral floats keep their decimal point so they
/// re-coerce as floats.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
        other => other.to_string(),
    }
}

fn render_element(value: &Value) -> String {
    match value {
        Value::String(text) if coerce_element(text).as_str() != Some(text.as_str()) => {
            format!("\"{text}\"")
        }
        other => render_scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, Value)>) -> Mapping {
        entries.into_iter().collect()
    }

    #[test]
    fn test_plain_scalars() {
        let out = serialize_frontmatter(&mapping(vec![
            ("id", Value::Integer(7)),
            ("title", Value::from("Login flow")),
            ("done", Value::Bool(false)),
            ("hours", Value::Float(2.5)),
        ]));
        assert_eq!(out, "id: 7\ntitle: Login flow\ndone: false\nhours: 2.5");
    }

    #[test]
    fn test_null_renders_bare_key() {
        let out = serialize_frontmatter(&mapping(vec![("updated", Value::Null)]));
        assert_eq!(out, "updated:");
    }

    #[test]
    fn test_quotes_colon_hash_and_newline() {
        let out = serialize_frontmatter(&mapping(vec![
            ("a", Value::from("contains: colon")),
            ("b", Value::from("issue #4")),
            ("c", Value::from("two\nlines")),
        ]));
        assert_eq!(out, "a: \"contains: colon\"\nb: \"issue #4\"\nc: \"two\nlines\"");
    }

    #[test]
    fn test_quotes_strings_that_would_change_type() {
        let out = serialize_frontmatter(&mapping(vec![
            ("a", Value::from("true")),
            ("b", Value::from("12")),
            ("c", Value::from("")),
            ("d", Value::from("[x]")),
        ]));
        assert_eq!(out, "a: \"true\"\nb: \"12\"\nc: \"\"\nd: \"[x]\"");
    }

    #[test]
    fn test_integral_float_keeps_decimal_point() {
        let out = serialize_frontmatter(&mapping(vec![("hours", Value::Float(10.0))]));
        assert_eq!(out, "hours: 10.0");
    }

    #[test]
    fn test_array() {
        let out = serialize_frontmatter(&mapping(vec![(
            "tags",
            Value::Array(vec![
                Value::from("auth"),
                Value::Integer(3),
                Value::Null,
                Value::from("42"),
            ]),
        )]));
        assert_eq!(out, "tags: [auth, 3, , \"42\"]");
    }

    #[test]
    fn test_nested_mapping_indents() {
        let inner = mapping(vec![("owner", Value::from("alice")), ("hours", Value::Integer(3))]);
        let out = serialize_frontmatter(&mapping(vec![
            ("meta", Value::Map(inner)),
            ("empty", Value::Map(Mapping::new())),
            ("status", Value::from("open")),
        ]));
        assert_eq!(out, "meta:\n  owner: alice\n  hours: 3\nempty:\nstatus: open");
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(serialize_frontmatter(&Mapping::new()), "");
    }
}
