//! Priority-grouped stylesheet
//!
//! Rules are kept in numbered groups, each anchored by a marker rule
//! `[stylesheet-group="N"]{}`. Groups appear in ascending order so a rule in a
//! higher group always comes later in the sheet and wins the cascade.

use crate::css_text;
use crate::sheet::LiveStyleSheet;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Numeric group identifier with a total order
#[derive(Debug, Clone, Copy)]
pub struct GroupKey(f64);

impl GroupKey {
    pub fn new(group: f64) -> Self {
        Self(group)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for GroupKey {
    fn from(group: f64) -> Self {
        Self(group)
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
struct Group {
    /// Index of the marker rule in the live sheet
    start: usize,
    rules: Vec<String>,
}

/// Grouped rules plus the set of rule keys already inserted
pub struct OrderedStyleSheet {
    groups: BTreeMap<GroupKey, Group>,
    seen: HashSet<String>,
    /// Rules in the live sheet that belong to no group
    leading: usize,
    sheet: Option<Box<dyn LiveStyleSheet>>,
}

impl OrderedStyleSheet {
    /// A sheet tracked in memory only, as on the server
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            seen: HashSet::new(),
            leading: 0,
            sheet: None,
        }
    }

    /// Attach to a live sheet, adopting any rules it already holds
    pub fn with_sheet(sheet: Box<dyn LiveStyleSheet>) -> Self {
        let mut ordered = Self::new();
        ordered.hydrate(sheet);
        ordered
    }

    fn hydrate(&mut self, sheet: Box<dyn LiveStyleSheet>) {
        let mut current: Option<GroupKey> = None;

        for (index, rule) in sheet.css_rules().into_iter().enumerate() {
            if css_text::is_group_marker(&rule) {
                current = css_text::parse_group_marker(&rule).map(GroupKey::from);
                match current {
                    Some(key) => {
                        self.groups.insert(
                            key,
                            Group {
                                start: index,
                                rules: Vec::new(),
                            },
                        );
                    }
                    // unreadable marker: still occupies a slot in the sheet
                    None => self.leading += 1,
                }
                continue;
            }

            match current.and_then(|key| self.groups.get_mut(&key)) {
                Some(group) => {
                    self.seen.insert(css_text::rule_key(&rule));
                    group.rules.push(rule);
                }
                None => self.leading += 1,
            }
        }

        debug!(
            groups = self.groups.len(),
            rules = self.seen.len(),
            "hydrated stylesheet"
        );
        self.sheet = Some(sheet);
    }

    pub fn group_keys(&self) -> Vec<GroupKey> {
        self.groups.keys().copied().collect()
    }

    /// Whether a rule with the same at-rules and selector was inserted
    pub fn has_rule(&self, rule: &str) -> bool {
        self.seen.contains(&css_text::rule_key(rule))
    }

    /// Number of rules, markers included, this sheet accounts for
    pub fn len(&self) -> usize {
        self.leading
            + self
                .groups
                .values()
                .map(|group| group.rules.len() + 1)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index where the group after `key` starts, or the end of the sheet
    fn next_group_start(&self, key: GroupKey) -> usize {
        use std::ops::Bound::{Excluded, Unbounded};
        self.groups
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(_, group)| group.start)
            .unwrap_or_else(|| self.len())
    }

    /// Account for one rule inserted at `index`
    fn shift_groups_after(&mut self, key: GroupKey) {
        use std::ops::Bound::{Excluded, Unbounded};
        for (_, group) in self.groups.range_mut((Excluded(key), Unbounded)) {
            group.start += 1;
        }
    }

    fn insert_physical(&mut self, rule: &str, index: usize) -> bool {
        match self.sheet.as_mut() {
            Some(sheet) => match sheet.insert_rule(rule, index) {
                Ok(_) => true,
                Err(error) => {
                    warn!(%error, "stylesheet rejected rule");
                    false
                }
            },
            None => true,
        }
    }

    fn ensure_group(&mut self, key: GroupKey) -> bool {
        if self.groups.contains_key(&key) {
            return true;
        }

        let start = self.next_group_start(key);
        if !self.insert_physical(&css_text::group_marker(key), start) {
            return false;
        }

        self.shift_groups_after(key);
        self.groups.insert(
            key,
            Group {
                start,
                rules: Vec::new(),
            },
        );
        debug!(group = %key, start, "created stylesheet group");
        true
    }

    /// Create `group` with only its marker, if it does not exist yet
    pub fn ensure_group_marker(&mut self, group: f64) -> bool {
        self.ensure_group(GroupKey::from(group))
    }

    /// Insert `rule` into `group`. Rules already seen are ignored.
    ///
    /// Returns false when the live sheet rejected the rule; nothing is
    /// recorded in that case, so the same rule can be retried.
    pub fn insert(&mut self, rule: &str, group: f64) -> bool {
        let key = GroupKey::from(group);
        if !self.ensure_group(key) {
            return false;
        }

        let rule_key = css_text::rule_key(rule);
        if self.seen.contains(&rule_key) {
            return true;
        }

        let index = self.next_group_start(key);
        if !self.insert_physical(rule, index) {
            return false;
        }

        self.shift_groups_after(key);
        self.seen.insert(rule_key);
        if let Some(group) = self.groups.get_mut(&key) {
            group.rules.push(rule.to_string());
        }
        true
    }

    /// Groups ascending, each marker first, then its rules sorted
    pub fn text_content(&self) -> String {
        let mut lines = Vec::with_capacity(self.len());
        for (key, group) in &self.groups {
            lines.push(css_text::group_marker(key));
            let mut rules = group.rules.clone();
            rules.sort();
            lines.extend(rules);
        }
        lines.join("\n")
    }

    /// Text of the attached live sheet, in physical order
    pub fn live_rules(&self) -> Option<Vec<String>> {
        self.sheet.as_ref().map(|sheet| sheet.css_rules())
    }
}

impl Default for OrderedStyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderedStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedStyleSheet")
            .field("groups", &self.groups)
            .field("seen", &self.seen.len())
            .field("live", &self.sheet.is_some())
            .finish()
    }
}
