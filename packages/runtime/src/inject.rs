//! Injecting compiled styles into the stylesheet roots
use crate::constants::ConstantRegistry;
use crate::css_text;
use crate::error::SheetResult;
use crate::roots::StyleSheetRoots;
use stylekit_common::InjectableStyle;
use tracing::debug;

/// Always matches and adds one id column of specificity
pub const SPECIFICITY_BUMP: &str = ":not(#\\#)";

pub const LTR_SCOPE: &str = "html:not([dir='rtl'])";
pub const RTL_SCOPE: &str = "html[dir='rtl']";

const PRIORITY_PER_LEVEL: f64 = 1000.0;

/// Number of specificity bumps for a priority
pub fn specificity_level(priority: f64) -> usize {
    if priority.is_finite() && priority > 0.0 {
        (priority / PRIORITY_PER_LEVEL).floor() as usize
    } else {
        0
    }
}

/// Append `level` bumps to every innermost selector, ahead of any pseudo-element
///
/// ```text
/// escalate("@media print{.x::before{content:\"\"}}", 2)
///   -> "@media print{.x:not(#\#):not(#\#)::before{content:\"\"}}"
/// ```
pub fn escalate(rule: &str, level: usize) -> String {
    if level == 0 {
        return rule.to_string();
    }

    let bump = SPECIFICITY_BUMP.repeat(level);
    css_text::rewrite_selectors(rule, &mut |selector| match pseudo_element_start(selector) {
        Some(index) => format!("{}{}{}", &selector[..index], bump, &selector[index..]),
        None => format!("{}{}", selector, bump),
    })
}

/// Offset of the first `::` outside parentheses
fn pseudo_element_start(selector: &str) -> Option<usize> {
    let bytes = selector.as_bytes();
    let mut depth = 0usize;

    for (index, byte) in bytes.iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => return Some(index),
            _ => {}
        }
    }
    None
}

/// Scope every innermost selector under a direction selector
pub fn scope_direction(rule: &str, scope: &str) -> String {
    css_text::rewrite_selectors(rule, &mut |selector| format!("{} {}", scope, selector))
}

/// Registers constants and inserts rules into every root
#[derive(Debug)]
pub struct StyleInjector {
    roots: StyleSheetRoots,
    constants: ConstantRegistry,
}

impl StyleInjector {
    pub fn new() -> SheetResult<Self> {
        Self::with_roots(StyleSheetRoots::new())
    }

    pub fn with_roots(roots: StyleSheetRoots) -> SheetResult<Self> {
        Ok(Self {
            roots,
            constants: ConstantRegistry::new()?,
        })
    }

    pub fn roots(&self) -> &StyleSheetRoots {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut StyleSheetRoots {
        &mut self.roots
    }

    pub fn constants(&self) -> &ConstantRegistry {
        &self.constants
    }

    /// Inject one compiled style under its class name or constant key.
    ///
    /// Returns the rule text handed to the stylesheet: nothing for a
    /// constant, the LTR rule, then the RTL rule when there is one.
    pub fn inject(&mut self, key: &str, style: &InjectableStyle) -> Vec<String> {
        if let Some(const_key) = &style.const_key {
            let const_val = style.const_val.as_deref().unwrap_or_default();
            self.constants.define(const_key.as_str(), const_val);
            return Vec::new();
        }

        debug!(key, priority = style.priority, "injecting style");
        self.insert(&style.ltr, style.priority, style.rtl.as_deref())
    }

    /// Inject styles in order, e.g. the `injected` map of a compile
    pub fn inject_all<'a>(
        &mut self,
        styles: impl IntoIterator<Item = (&'a String, &'a InjectableStyle)>,
    ) -> Vec<String> {
        styles
            .into_iter()
            .flat_map(|(key, style)| self.inject(key, style))
            .collect()
    }

    /// Insert rule text directly
    pub fn insert(&mut self, ltr: &str, priority: f64, rtl: Option<&str>) -> Vec<String> {
        let level = specificity_level(priority);
        let texts = match rtl {
            Some(rtl) => vec![
                self.prepare(ltr, level, Some(LTR_SCOPE)),
                self.prepare(rtl, level, Some(RTL_SCOPE)),
            ],
            None => vec![self.prepare(ltr, level, None)],
        };

        for text in &texts {
            self.roots.insert(text, priority);
        }
        texts
    }

    fn prepare(&self, rule: &str, level: usize, scope: Option<&str>) -> String {
        let mut text = css_text::strip_comments(rule).trim().to_string();
        if let Some(scope) = scope {
            text = scope_direction(&text, scope);
        }
        self.constants.substitute(&escalate(&text, level))
    }

    pub fn text_content(&self) -> String {
        self.roots.text_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bumps(text: &str) -> usize {
        text.matches(SPECIFICITY_BUMP).count()
    }

    #[test]
    fn test_specificity_level() {
        assert_eq!(specificity_level(0.1), 0);
        assert_eq!(specificity_level(999.0), 0);
        assert_eq!(specificity_level(3130.0), 3);
        assert_eq!(specificity_level(f64::NAN), 0);
    }

    #[test]
    fn test_escalation_counts() {
        assert_eq!(bumps(&escalate(".x{color:red}", 3)), 3);
        assert_eq!(bumps(&escalate(".x{color:red}", 1)), 1);

        let nested = escalate("@media print{.x.x{color:red}}", 6);
        assert_eq!(bumps(&nested), 6);
        assert!(nested.starts_with("@media print{.x.x:not("));
    }

    #[test]
    fn test_escalation_before_pseudo_element() {
        assert_eq!(
            escalate(".x:hover::before{content:\"\"}", 1),
            ".x:hover:not(#\\#)::before{content:\"\"}"
        );
    }

    #[test]
    fn test_escalation_per_alternative() {
        let escalated = escalate(".x::-webkit-slider-thumb, .x::-moz-range-thumb{color:red}", 2);
        assert_eq!(bumps(&escalated), 4);

        let observer = escalate(".x.x:where(.m:active ~ *, :has(~ .m:active)){opacity:1}", 1);
        assert_eq!(bumps(&observer), 1);
        assert!(observer.starts_with(".x.x:where(.m:active ~ *, :has(~ .m:active)):not("));
    }

    #[test]
    fn test_keyframes_untouched() {
        let keyframes = "@keyframes spin{from{opacity:0}to{opacity:1}}";
        assert_eq!(escalate(keyframes, 4), keyframes);
    }

    #[test]
    fn test_direction_scoping() {
        let mut injector = StyleInjector::new().unwrap();
        let texts = injector.insert(
            "/* @ltr begin */.x{margin-left:4px}/* @ltr end */",
            4000.0,
            Some("/* @rtl begin */.x{margin-right:4px}/* @rtl end */"),
        );
        assert_eq!(
            texts,
            vec![
                format!("html:not([dir='rtl']) .x{}{{margin-left:4px}}", SPECIFICITY_BUMP.repeat(4)),
                format!("html[dir='rtl'] .x{}{{margin-right:4px}}", SPECIFICITY_BUMP.repeat(4)),
            ]
        );
    }

    #[test]
    fn test_constants_register_without_rules() {
        let mut injector = StyleInjector::new().unwrap();
        let texts = injector.inject("xknown", &InjectableStyle::constant("xknown", "blue"));
        assert!(texts.is_empty());
        assert!(injector.text_content().is_empty());
        assert_eq!(injector.constants().get("xknown"), Some("blue"));
    }

    #[test]
    fn test_constant_without_value_inserts_nothing() {
        let mut injector = StyleInjector::new().unwrap();
        let style = InjectableStyle {
            const_val: None,
            ..InjectableStyle::constant("xempty", "unused")
        };
        assert!(injector.inject("xempty", &style).is_empty());
        assert!(injector.text_content().is_empty());
        assert_eq!(injector.constants().get("xempty"), Some(""));
    }
}
