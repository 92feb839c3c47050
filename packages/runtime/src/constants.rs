//! Named constants substituted into rule text at injection time
use crate::error::{SheetError, SheetResult};
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::debug;

const REFERENCE_PATTERN: &str = r"var\(--([A-Za-z0-9_-]+)\)";

/// Constant key → value, last write wins
#[derive(Debug, Clone)]
pub struct ConstantRegistry {
    values: HashMap<String, String>,
    reference: Regex,
}

impl ConstantRegistry {
    pub fn new() -> SheetResult<Self> {
        let reference = Regex::new(REFERENCE_PATTERN)
            .map_err(|error| SheetError::invalid_pattern(REFERENCE_PATTERN, error.to_string()))?;
        Ok(Self {
            values: HashMap::new(),
            reference,
        })
    }

    pub fn define(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, value = %value, "registered constant");
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every `var(--key)` whose key is registered; others stay as written
    pub fn substitute(&self, text: &str) -> String {
        if self.values.is_empty() {
            return text.to_string();
        }
        self.reference
            .replace_all(text, |captures: &Captures<'_>| match self.values.get(&captures[1]) {
                Some(value) => value.clone(),
                None => captures[0].to_string(),
            })
            .into_owned()
    }
}
