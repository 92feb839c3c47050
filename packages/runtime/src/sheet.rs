//! Live stylesheet abstraction
use crate::css_text;
use crate::error::{SheetError, SheetResult};
use std::fmt;

/// The host stylesheet rules are physically inserted into
///
/// Mirrors the CSSOM surface the runtime needs: read the current rules and
/// insert one at an index. The host may reject a rule it cannot parse.
pub trait LiveStyleSheet: Send {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of every rule, in sheet order
    fn css_rules(&self) -> Vec<String>;

    /// Insert `rule` at `index`, returning the index it landed at
    fn insert_rule(&mut self, rule: &str, index: usize) -> SheetResult<usize>;
}

type RuleFilter = Box<dyn Fn(&str) -> bool + Send>;

/// In-memory stylesheet, used for server rendering and tests
#[derive(Default)]
pub struct MemoryStyleSheet {
    rules: Vec<String>,
    filter: Option<RuleFilter>,
}

impl MemoryStyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet holding previously rendered text, one rule per top-level block
    pub fn from_text(text: &str) -> Self {
        let stripped = css_text::strip_comments(text);
        Self {
            rules: css_text::blocks(&stripped)
                .into_iter()
                .map(|block| block.text.to_string())
                .collect(),
            filter: None,
        }
    }

    /// Reject every rule for which `accept` returns false, like a host that
    /// does not support a selector
    pub fn with_filter(mut self, accept: impl Fn(&str) -> bool + Send + 'static) -> Self {
        self.filter = Some(Box::new(accept));
        self
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn text(&self) -> String {
        self.rules.join("\n")
    }
}

impl fmt::Debug for MemoryStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStyleSheet")
            .field("rules", &self.rules)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl LiveStyleSheet for MemoryStyleSheet {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn css_rules(&self) -> Vec<String> {
        self.rules.clone()
    }

    fn insert_rule(&mut self, rule: &str, index: usize) -> SheetResult<usize> {
        if index > self.rules.len() {
            return Err(SheetError::index_out_of_bounds(index, self.rules.len()));
        }
        if let Some(accept) = &self.filter {
            if !accept(rule) {
                return Err(SheetError::rejected(rule, "unsupported rule"));
            }
        }
        self.rules.insert(index, rule.to_string());
        Ok(index)
    }
}
