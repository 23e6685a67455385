//! Scalar token coercion.
//!
//! Turns one trimmed token into a [`Value`]. Rules are tried in order and the
//! first match wins:
//!
//! 1. `true` / `false`
//! 2. `null`, `~`, or empty
//! 3. `-?[0-9]+(\.[0-9]+)?` (a `.` selects float parsing)
//! 4. matching single or double quotes, unwrapped without escape processing
//! 5. `[ ... ]`, split on `,` with each piece coerced again (no nesting)
//! 6. anything else is kept as a string
//!
//! Coercion never fails. Array elements containing a literal comma are split
//! apart; that is a known limitation of the format, not something to repair.

use std::sync::LazyLock;

use regex::Regex;

use crate::pattern::compile_regex;
use crate::value::Value;

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\A-?[0-9]+(?:\.[0-9]+)?\z"));

/// Coerce a raw token into a typed value.
///
/// The token is trimmed first, so callers may pass the raw value segment of a
/// `key: value` line.
#[must_use]
pub fn coerce_scalar(token: &str) -> Value {
    coerce(token.trim(), true)
}

/// Coerce an array element: same rules with the array rule disabled.
pub(crate) fn coerce_element(token: &str) -> Value {
    coerce(token.trim(), false)
}

fn coerce(token: &str, allow_array: bool) -> Value {
    match token {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "~" | "" => return Value::Null,
        _ => {}
    }

    if NUMBER_REGEX.is_match(token) {
        return parse_number(token);
    }

    if let Some(inner) = unquote(token) {
        return Value::String(inner.to_string());
    }

    if allow_array
        && let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']'))
    {
        if inner.trim().is_empty() {
            return Value::Array(Vec::new());
        }
        return Value::Array(inner.split(',').map(coerce_element).collect());
    }

    Value::String(token.to_string())
}

fn parse_number(token: &str) -> Value {
    if !token.contains('.')
        && let Ok(n) = token.parse::<i64>()
    {
        return Value::Integer(n);
    }
    // Integers too wide for i64 land here as well. Beyond f64 range the
    // token stays text so it serializes back unchanged.
    match token.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::String(token.to_string()),
    }
}

fn unquote(token: &str) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find_map(|quote| token.strip_prefix(quote)?.strip_suffix(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_and_null() {
        assert_eq!(coerce_scalar("true"), Value::Bool(true));
        assert_eq!(coerce_scalar("false"), Value::Bool(false));
        assert_eq!(coerce_scalar("null"), Value::Null);
        assert_eq!(coerce_scalar("~"), Value::Null);
        assert_eq!(coerce_scalar("   "), Value::Null);
        // Case sensitive, like the rest of the grammar.
        assert_eq!(coerce_scalar("True"), Value::from("True"));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(coerce_scalar("42"), Value::Integer(42));
        assert_eq!(coerce_scalar("-7"), Value::Integer(-7));
        assert_eq!(coerce_scalar("2.5"), Value::Float(2.5));
        assert_eq!(coerce_scalar("-0.25"), Value::Float(-0.25));
        assert_eq!(coerce_scalar("007"), Value::Integer(7));
    }

    #[test]
    fn test_not_quite_numbers_stay_strings() {
        assert_eq!(coerce_scalar("5."), Value::from("5."));
        assert_eq!(coerce_scalar(".5"), Value::from(".5"));
        assert_eq!(coerce_scalar("1e3"), Value::from("1e3"));
        assert_eq!(coerce_scalar("2024-01-15"), Value::from("2024-01-15"));
    }

    #[test]
    fn test_integer_overflow_becomes_float() {
        assert_eq!(
            coerce_scalar("99999999999999999999"),
            Value::Float(99_999_999_999_999_999_999.0)
        );
    }

    #[test]
    fn test_number_beyond_float_range_stays_string() {
        let token = "1".repeat(400);
        assert_eq!(coerce_scalar(&token), Value::String(token.clone()));
        assert_eq!(coerce_scalar(&format!("-{token}.5")), Value::String(format!("-{token}.5")));
    }

    #[test]
    fn test_quoted_strings_are_unwrapped_verbatim() {
        assert_eq!(coerce_scalar("\"contains: colon\""), Value::from("contains: colon"));
        assert_eq!(coerce_scalar("'single'"), Value::from("single"));
        assert_eq!(coerce_scalar("\"42\""), Value::from("42"));
        assert_eq!(coerce_scalar("\"a \\n b\""), Value::from("a \\n b"));
        assert_eq!(coerce_scalar("\""), Value::from("\""));
        assert_eq!(coerce_scalar("\"mixed'"), Value::from("\"mixed'"));
    }

    #[test]
    fn test_flat_array() {
        assert_eq!(
            coerce_scalar("[a, b, c]"),
            Value::Array(vec![Value::from("a"), Value::from("b"), Value::from("c")])
        );
        assert_eq!(
            coerce_scalar("[1, 2.5, true, ~, \"x\"]"),
            Value::Array(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::Bool(true),
                Value::Null,
                Value::from("x"),
            ])
        );
        assert_eq!(coerce_scalar("[]"), Value::Array(Vec::new()));
    }

    #[test]
    fn test_array_does_not_nest() {
        // The inner split runs first, so nested brackets come apart as text.
        assert_eq!(
            coerce_scalar("[[a, b], c]"),
            Value::Array(vec![Value::from("[a"), Value::from("b]"), Value::from("c")])
        );
        assert_eq!(
            coerce_scalar("[[a]]"),
            Value::Array(vec![Value::from("[a]")])
        );
    }

    #[test]
    fn test_plain_string_is_trimmed() {
        assert_eq!(coerce_scalar("  in progress  "), Value::from("in progress"));
    }
}
