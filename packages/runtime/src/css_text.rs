//! Tolerant parsing of the CSS subset produced by the compiler
//!
//! Rules are `prelude{body}` blocks, possibly wrapped in at-rules. Nothing
//! here validates CSS; unbalanced input is kept as-is.

use std::fmt::Display;

const GROUP_ATTRIBUTE: &str = "stylesheet-group";

/// Whitespace before these characters is insignificant in a rule key
const NO_SPACE_BEFORE: &str = "{}(),>~+;]=";
/// Whitespace after these characters is insignificant in a rule key
const NO_SPACE_AFTER: &str = "{}(,>~+;[=";

/// A top-level `prelude { body }` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub prelude: &'a str,
    pub body: &'a str,
    /// The whole block, trimmed
    pub text: &'a str,
}

impl Block<'_> {
    /// True when the body holds further blocks, as for `@media`
    pub fn is_nested(&self) -> bool {
        find_unquoted(self.body, '{').is_some()
    }

    pub fn is_at_rule(&self) -> bool {
        self.prelude.starts_with('@')
    }

    pub fn is_keyframes(&self) -> bool {
        self.is_at_rule() && self.prelude.contains("keyframes")
    }
}

pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Walk `text` outside quoted strings, calling `visit` with each byte offset
/// and character. Stops early when `visit` returns `true`.
fn scan_unquoted(text: &str, mut visit: impl FnMut(usize, char) -> bool) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            continue;
        }
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
            continue;
        }
        if visit(index, ch) {
            return Some(index);
        }
    }
    None
}

fn find_unquoted(text: &str, target: char) -> Option<usize> {
    scan_unquoted(text, |_, ch| ch == target)
}

/// Offset of the `}` closing the `{` at `open`
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    scan_unquoted(&text[open..], |_, ch| match ch {
        '{' => {
            depth += 1;
            false
        }
        '}' => {
            depth = depth.saturating_sub(1);
            depth == 0
        }
        _ => false,
    })
    .map(|index| open + index)
}

/// Split stylesheet text into its top-level blocks
pub fn blocks(text: &str) -> Vec<Block<'_>> {
    let mut parsed = Vec::new();
    let mut offset = 0;

    while offset < text.len() {
        let rest = &text[offset..];
        let Some(open) = find_unquoted(rest, '{') else {
            break;
        };
        let Some(close) = matching_brace(rest, open) else {
            break;
        };

        parsed.push(Block {
            prelude: rest[..open].trim(),
            body: &rest[open + 1..close],
            text: rest[..=close].trim(),
        });
        offset += close + 1;
    }

    parsed
}

/// Split on commas outside parentheses, brackets and strings
pub fn split_top_level_commas(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    scan_unquoted(text, |index, ch| {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
        false
    });
    parts.push(&text[start..]);

    parts
}

/// Apply `rewrite` to every selector alternative of every innermost rule.
///
/// At-rule preludes are kept, `@keyframes` bodies and bodiless at-rules such
/// as `@font-face` are left untouched.
pub fn rewrite_selectors<F>(text: &str, rewrite: &mut F) -> String
where
    F: FnMut(&str) -> String,
{
    let parsed = blocks(text);
    if parsed.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for block in parsed {
        if block.is_keyframes() {
            out.push_str(block.text);
        } else if block.is_nested() {
            out.push_str(block.prelude);
            out.push('{');
            out.push_str(&rewrite_selectors(block.body, rewrite));
            out.push('}');
        } else if block.is_at_rule() {
            out.push_str(block.text);
        } else {
            let selectors: Vec<String> = split_top_level_commas(block.prelude)
                .into_iter()
                .map(|selector| rewrite(selector.trim()))
                .collect();
            out.push_str(&selectors.join(", "));
            out.push('{');
            out.push_str(block.body);
            out.push('}');
        }
    }
    out
}

/// Collapse whitespace, drop it around punctuation and unify quotes
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        let ch = if ch == '\'' { '"' } else { ch };
        if pending_space
            && !NO_SPACE_BEFORE.contains(ch)
            && !out.ends_with(|last: char| NO_SPACE_AFTER.contains(last))
        {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

/// Identity of a rule for de-duplication: its at-rule chain and selector
///
/// ```text
/// "@media print { .x:hover { color: red } }" -> "@media print{.x:hover"
/// ```
pub fn rule_key(rule: &str) -> String {
    let stripped = strip_comments(rule);
    let mut chain: Vec<&str> = Vec::new();
    let mut current = stripped.as_str();

    loop {
        let Some(block) = blocks(current).into_iter().next() else {
            chain.push(current.trim());
            break;
        };
        chain.push(block.prelude);
        if block.is_nested() && !block.is_keyframes() {
            current = block.body;
        } else {
            break;
        }
    }

    normalize(&chain.join("{"))
}

pub fn is_group_marker(rule: &str) -> bool {
    rule.contains(GROUP_ATTRIBUTE)
}

/// `[stylesheet-group="N"]{}`
pub fn group_marker(group: impl Display) -> String {
    format!("[{}=\"{}\"]{{}}", GROUP_ATTRIBUTE, group)
}

/// Group number of a marker rule, with either quote style or none
pub fn parse_group_marker(rule: &str) -> Option<f64> {
    let start = rule.find(GROUP_ATTRIBUTE)? + GROUP_ATTRIBUTE.len();
    let rest = rule[start..].trim_start().strip_prefix('=')?;
    let end = rest.find(']')?;
    rest[..end]
        .trim()
        .trim_matches(|ch| ch == '"' || ch == '\'')
        .parse()
        .ok()
}
