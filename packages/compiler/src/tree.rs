//! Authored style trees
//!
//! Styles arrive as loosely-typed JSON-like data. They are converted once,
//! at this boundary, into a tagged representation so the rest of the
//! pipeline never has to probe shapes again.

use crate::error::{CompileError, CompileResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// A single authored value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            Scalar::Number(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

/// The value side of an authored style entry
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Explicitly unset
    Null,
    Scalar(Scalar),
    /// Ordered fallback chain; the browser keeps the last value it supports
    Fallback(Vec<Option<Scalar>>),
    /// Nested tree keyed by conditions (or by properties under a condition)
    Conditional(StyleTree),
}

impl From<Scalar> for StyleValue {
    fn from(value: Scalar) -> Self {
        StyleValue::Scalar(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Scalar(value.into())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Scalar(value.into())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Scalar(value.into())
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Scalar(value.into())
    }
}

impl From<StyleTree> for StyleValue {
    fn from(tree: StyleTree) -> Self {
        StyleValue::Conditional(tree)
    }
}

/// Ordered mapping of property or condition keys to values
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct StyleTree {
    entries: IndexMap<String, StyleValue>,
}

impl StyleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, StyleValue)> for StyleTree {
    fn from_iter<I: IntoIterator<Item = (String, StyleValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for StyleTree {
    type Error = CompileError;

    fn try_from(value: serde_json::Value) -> CompileResult<Self> {
        match value {
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let converted = convert_value(&key, value)?;
                    Ok::<_, CompileError>((key, converted))
                })
                .collect(),
            other => Err(CompileError::invalid_style_value(
                "<root>",
                format!("expected an object, found {}", other),
            )),
        }
    }
}

fn convert_value(key: &str, value: serde_json::Value) -> CompileResult<StyleValue> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(StyleValue::Null),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Null => Ok(None),
                other => convert_scalar(key, other).map(Some),
            })
            .collect::<CompileResult<Vec<_>>>()
            .map(StyleValue::Fallback),
        Value::Object(_) => StyleTree::try_from(value).map(StyleValue::Conditional),
        other => convert_scalar(key, other).map(StyleValue::Scalar),
    }
}

fn convert_scalar(key: &str, value: serde_json::Value) -> CompileResult<Scalar> {
    use serde_json::Value;

    match value {
        Value::String(text) => Ok(Scalar::Text(text)),
        Value::Number(number) => number
            .as_f64()
            .map(Scalar::Number)
            .ok_or_else(|| CompileError::invalid_style_value(key, "number is out of range")),
        other => Err(CompileError::invalid_style_value(
            key,
            format!("expected a string or a number, found {}", other),
        )),
    }
}

/// Named style trees, compiled together
pub type Namespaces = IndexMap<String, StyleTree>;

/// Parse `{ namespace: { ...styles } }` from JSON
pub fn namespaces_from_json(value: serde_json::Value) -> CompileResult<Namespaces> {
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(name, tree)| Ok::<_, CompileError>((name, StyleTree::try_from(tree)?)))
            .collect(),
        other => Err(CompileError::invalid_style_value(
            "<namespaces>",
            format!("expected an object, found {}", other),
        )),
    }
}
