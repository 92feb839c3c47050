//! Several documents or shadow roots sharing one set of rules
use crate::css_text;
use crate::ordered_sheet::OrderedStyleSheet;
use crate::sheet::LiveStyleSheet;
use tracing::debug;

/// Handle to a root registered with `StyleSheetRoots`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(usize);

/// Every root receives every insert
///
/// The first root is authoritative: it hydrates from whatever its sheet
/// already holds. Later roots start from the first root's current content.
#[derive(Debug, Default)]
pub struct StyleSheetRoots {
    roots: Vec<OrderedStyleSheet>,
}

impl StyleSheetRoots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root, optionally backed by a live sheet
    pub fn add_root(&mut self, sheet: Option<Box<dyn LiveStyleSheet>>) -> RootId {
        let id = RootId(self.roots.len());

        let root = match (self.roots.first(), sheet) {
            (None, Some(sheet)) => OrderedStyleSheet::with_sheet(sheet),
            (None, None) => OrderedStyleSheet::new(),
            (Some(first), sheet) => {
                let mut root = match sheet {
                    Some(sheet) => OrderedStyleSheet::with_sheet(sheet),
                    None => OrderedStyleSheet::new(),
                };
                seed_from(&mut root, first);
                root
            }
        };

        debug!(root = id.0, "added stylesheet root");
        self.roots.push(root);
        id
    }

    pub fn root(&self, id: RootId) -> Option<&OrderedStyleSheet> {
        self.roots.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Insert into every root, creating a memory-only root if there is none.
    /// Returns true when every root accepted the rule.
    pub fn insert(&mut self, rule: &str, group: f64) -> bool {
        if self.roots.is_empty() {
            self.add_root(None);
        }
        self.roots
            .iter_mut()
            .map(|root| root.insert(rule, group))
            .fold(true, |all, inserted| all && inserted)
    }

    /// Content of the authoritative root
    pub fn text_content(&self) -> String {
        self.roots
            .first()
            .map(OrderedStyleSheet::text_content)
            .unwrap_or_default()
    }
}

/// Replay the serialized content of `source` into `target`
fn seed_from(target: &mut OrderedStyleSheet, source: &OrderedStyleSheet) {
    let text = source.text_content();
    let mut group = None;

    for block in css_text::blocks(&text) {
        if css_text::is_group_marker(block.text) {
            group = css_text::parse_group_marker(block.text);
            if let Some(group) = group {
                target.ensure_group_marker(group);
            }
        } else if let Some(group) = group {
            target.insert(block.text, group);
        }
    }
}
