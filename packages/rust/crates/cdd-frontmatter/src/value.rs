//! Frontmatter values and the ordered mapping that holds them.
//!
//! The parser only ever produces scalars, flat arrays and raw multiline
//! strings. `Value::Map` exists for callers that hand nested mappings to the
//! serializer.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`, `~`, or an empty token.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Plain, quoted, or multiline text.
    String(String),
    /// Flat `[a, b, c]` array. Elements are never arrays themselves.
    Array(Vec<Value>),
    /// Nested mapping (serializer input only).
    Map(Mapping),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of integers and floats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Map(mapping) => {
                f.write_str("{")?;
                for (idx, (key, value)) in mapping.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Map(mapping) => mapping.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Self::Map(value)
    }
}

/// String-keyed map that keeps keys in first-seen order.
///
/// Re-inserting an existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Shallow merge: every key of `other` overwrites or extends `self`.
    pub fn merge(&mut self, other: Mapping) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_seen_position() {
        let mut mapping = Mapping::new();
        mapping.insert("status", "draft");
        mapping.insert("title", "Login");
        let previous = mapping.insert("status", "done");

        assert_eq!(previous, Some(Value::from("draft")));
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["status", "title"]);
        assert_eq!(mapping.get("status"), Some(&Value::from("done")));
    }

    #[test]
    fn test_merge_incoming_wins_and_appends() {
        let mut base: Mapping = [("id", Value::Integer(1)), ("status", Value::from("open"))]
            .into_iter()
            .collect();
        let updates: Mapping = [("status", "closed"), ("owner", "sam")].into_iter().collect();

        base.merge(updates);

        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["id", "status", "owner"]);
        assert_eq!(base.get("status").and_then(Value::as_str), Some("closed"));
    }

    #[test]
    fn test_remove() {
        let mut mapping: Mapping = [("a", 1_i64), ("b", 2_i64)].into_iter().collect();
        assert_eq!(mapping.remove("a"), Some(Value::Integer(1)));
        assert_eq!(mapping.remove("a"), None);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_display_natural_text() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(
            Value::Array(vec![Value::from("a"), Value::Integer(2)]).to_string(),
            "a, 2"
        );
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mapping: Mapping = [("zeta", Value::Bool(true)), ("alpha", Value::Null)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"zeta":true,"alpha":null}"#);
    }
}
