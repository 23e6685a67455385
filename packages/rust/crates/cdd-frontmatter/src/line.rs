//! Line classification for the frontmatter block.
//!
//! The parser never inspects raw strings directly; every line is first mapped
//! to a [`Line`] and the state machine in [`crate::parser`] matches on that.

/// One classified line of a frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// First non-whitespace character is `#`.
    Comment,
    /// `key: value` shape. The key is everything before the first colon.
    Entry {
        /// Leading whitespace, in bytes.
        indent: usize,
        /// Trimmed key, never empty.
        key: &'a str,
        /// Trimmed value segment, possibly empty.
        value: &'a str,
    },
    /// Anything else: text that only matters inside a multiline value.
    Continuation,
}

/// Classify a single line (without its line terminator).
#[must_use]
pub fn classify_line(line: &str) -> Line<'_> {
    let content = line.trim_start();
    if content.trim_end().is_empty() {
        return Line::Blank;
    }
    if content.starts_with('#') {
        return Line::Comment;
    }

    if let Some((key, value)) = content.split_once(':') {
        let key = key.trim();
        if !key.is_empty() {
            return Line::Entry {
                indent: line.len() - content.len(),
                key,
                value: value.trim(),
            };
        }
    }

    Line::Continuation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify_line(""), Line::Blank);
        assert_eq!(classify_line("   \t"), Line::Blank);
        assert_eq!(classify_line("# note: not a key"), Line::Comment);
        assert_eq!(classify_line("   # indented"), Line::Comment);
    }

    #[test]
    fn test_entry_splits_on_first_colon() {
        assert_eq!(
            classify_line("url: https://example.com"),
            Line::Entry {
                indent: 0,
                key: "url",
                value: "https://example.com",
            }
        );
    }

    #[test]
    fn test_entry_indent_and_empty_value() {
        assert_eq!(
            classify_line("  nested:   "),
            Line::Entry {
                indent: 2,
                key: "nested",
                value: "",
            }
        );
    }

    #[test]
    fn test_key_may_contain_spaces() {
        assert_eq!(
            classify_line("Next step: ship it"),
            Line::Entry {
                indent: 0,
                key: "Next step",
                value: "ship it",
            }
        );
    }

    #[test]
    fn test_continuation() {
        assert_eq!(classify_line("  - first bullet"), Line::Continuation);
        assert_eq!(classify_line(": orphan value"), Line::Continuation);
        assert_eq!(classify_line("plain text"), Line::Continuation);
    }
}
