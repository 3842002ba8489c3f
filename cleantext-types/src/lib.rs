//! Core types for the cleantext record normalizer.
//!
//! This crate holds everything the normalizer and its callers share:
//!
//! - **Configuration**: [`CleanConfig`] and its enumerated options
//! - **Records**: [`Record`], an ordered field map as it travels through a stream
//! - **Results**: [`Normalized`], the shaped tokens and tags for one record
//! - **Errors**: one enum per failure phase, see [`error`]

#![warn(missing_docs)]

pub mod config;
pub mod error;

use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use config::{parse_bool, BaseType, CleanConfig, ErrorPolicy, Tagset, DEFAULT_TAG_FIELD};
pub use error::{BuildError, ConfigError, NormalizeError, ResourceError};

/// A token paired with its part-of-speech tag.
///
/// Exists only while a record is on the part-of-speech aware path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedToken {
    /// Token text.
    pub text: String,
    /// Tag from the requested tagset.
    pub tag: String,
}

impl TaggedToken {
    /// Creates a tagged token.
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// Value of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single string.
    Text(String),
    /// An ordered sequence of strings.
    Multi(Vec<String>),
}

impl FieldValue {
    /// Returns the string if this is a single value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Multi(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Multi(value)
    }
}

/// One record: field names mapped to values, in arrival order.
///
/// Records are independent of each other. The normalizer rewrites the
/// text field and sets the tag field; every other field passes through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, keeping its position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns a field value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns a field value if it is a single string.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Removes a field, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.shift_remove(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drops empty strings from multivalue fields.
    ///
    /// Multivalue consumers have no representation for an empty member,
    /// so writers call this right before emitting a record.
    pub fn drop_empty_values(&mut self) {
        for value in self.fields.values_mut() {
            if let FieldValue::Multi(items) = value {
                items.retain(|s| !s.is_empty());
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A token sequence in its output shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shaped {
    /// Ordered tokens.
    Multi(Vec<String>),
    /// Tokens joined with single spaces.
    Joined(String),
}

impl Shaped {
    /// Shapes `tokens` as a sequence or as one space-joined string.
    pub fn new(tokens: Vec<String>, multivalue: bool) -> Self {
        if multivalue {
            Shaped::Multi(tokens)
        } else {
            Shaped::Joined(tokens.join(" "))
        }
    }

    /// Returns the tokens if this is a sequence.
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Shaped::Multi(tokens) => Some(tokens),
            Shaped::Joined(_) => None,
        }
    }

    /// Returns the string if this is joined.
    pub fn as_joined(&self) -> Option<&str> {
        match self {
            Shaped::Multi(_) => None,
            Shaped::Joined(s) => Some(s),
        }
    }
}

impl From<Shaped> for FieldValue {
    fn from(value: Shaped) -> Self {
        match value {
            Shaped::Multi(tokens) => FieldValue::Multi(tokens),
            Shaped::Joined(s) => FieldValue::Text(s),
        }
    }
}

impl fmt::Display for Shaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shaped::Multi(tokens) => write!(f, "{tokens:?}"),
            Shaped::Joined(s) => f.write_str(s),
        }
    }
}

/// Normalization result for one text.
///
/// `tags` is populated only on the part-of-speech aware path and always
/// has the same shape (and, as a sequence, the same length) as `tokens`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Normalized tokens.
    pub tokens: Shaped,
    /// Part-of-speech tags parallel to `tokens`.
    pub tags: Option<Shaped>,
    /// Number of tokens before shaping.
    pub token_count: usize,
}

impl Normalized {
    /// Shapes tokens and optional tags with the same output mode.
    pub fn shape(tokens: Vec<String>, tags: Option<Vec<String>>, multivalue: bool) -> Self {
        let token_count = tokens.len();
        Self {
            tokens: Shaped::new(tokens, multivalue),
            tags: tags.map(|t| Shaped::new(t, multivalue)),
            token_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_preserves_field_order() {
        let mut r: Record = [("id", "1"), ("text", "hello"), ("src", "web")]
            .into_iter()
            .collect();
        r.insert("text", vec!["hello".to_owned()]);
        let names: Vec<&str> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["id", "text", "src"]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut r: Record = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(r.remove("b"), Some(FieldValue::Text("2".into())));
        let names: Vec<&str> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn get_text_rejects_multivalue() {
        let mut r = Record::new();
        r.insert("tokens", vec!["a".to_owned()]);
        assert!(r.get("tokens").is_some());
        assert!(r.get_text("tokens").is_none());
    }

    #[test]
    fn record_json_roundtrip_is_transparent() {
        let json = r#"{"id":"7","text":"a b","tags":["x","y"]}"#;
        let r: Record = serde_json::from_str(json).unwrap();
        assert_eq!(r.get_text("text"), Some("a b"));
        assert_eq!(
            r.get("tags"),
            Some(&FieldValue::Multi(vec!["x".into(), "y".into()]))
        );
        assert_eq!(serde_json::to_string(&r).unwrap(), json);
    }

    #[test]
    fn drop_empty_values_only_touches_multivalues() {
        let mut r = Record::new();
        r.insert("text", vec!["check".to_owned(), String::new(), "site".to_owned()]);
        r.insert("note", "");
        r.drop_empty_values();
        assert_eq!(
            r.get("text"),
            Some(&FieldValue::Multi(vec!["check".into(), "site".into()]))
        );
        assert_eq!(r.get_text("note"), Some(""));
    }

    #[test]
    fn shaped_join_uses_single_spaces() {
        let s = Shaped::new(vec!["cats".into(), "are".into(), "fast".into()], false);
        assert_eq!(s.as_joined(), Some("cats are fast"));
        assert!(s.as_multi().is_none());
    }

    #[test]
    fn normalized_shapes_tags_like_tokens() {
        let n = Normalized::shape(
            vec!["run".into(), "dog".into()],
            Some(vec!["VB".into(), "NN".into()]),
            false,
        );
        assert_eq!(n.tokens, Shaped::Joined("run dog".into()));
        assert_eq!(n.tags, Some(Shaped::Joined("VB NN".into())));
        assert_eq!(n.token_count, 2);

        let n = Normalized::shape(vec!["run".into()], None, true);
        assert_eq!(n.tokens.as_multi(), Some(&["run".to_owned()][..]));
        assert!(n.tags.is_none());
    }
}
