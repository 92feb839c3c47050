//! Rule generation: class name, declarations, selector and priority
use crate::error::CompileResult;
use crate::hash;
use crate::options::CompileOptions;
use crate::physical_rtl::{generate_ltr, generate_rtl, Declaration};
use crate::priority::rule_priority;
use crate::rules::Rule;
use crate::transform_value::transform_value;
use crate::utils::dashify;
use stylekit_common::InjectableStyle;
use tracing::debug;

const THUMB_PSEUDO: &str = "::thumb";
const THUMB_VARIANTS: [&str; 3] = ["::-webkit-slider-thumb", "::-moz-range-thumb", "::-ms-thumb"];

/// Output of generating one rule
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRule {
    pub class_name: String,
    pub style: InjectableStyle,
    /// Authored key path the rule came from
    pub origin_path: Vec<String>,
}

pub fn generate_rule(rule: &Rule, options: &CompileOptions) -> CompileResult<GeneratedRule> {
    Ok(prepare_rule(rule, options)?.generate(options))
}

/// A rule with its values normalised and its class name computed, but no CSS yet
#[derive(Debug, Clone)]
pub struct PreparedRule<'a> {
    rule: &'a Rule,
    dashed: String,
    values: Vec<String>,
    pseudos: Vec<String>,
    at_rules: Vec<String>,
    const_rules: Vec<String>,
    class_name: String,
}

pub fn prepare_rule<'a>(rule: &'a Rule, options: &CompileOptions) -> CompileResult<PreparedRule<'a>> {
    let dashed = dashify(&rule.property);
    let values = rule
        .value
        .values()
        .iter()
        .map(|value| transform_value(&rule.property, value, options))
        .collect::<CompileResult<Vec<_>>>()?;

    let pseudos = rule.pseudos();
    let at_rules = rule.at_rules();
    let const_rules = rule.const_rules();

    let mut class_name = hash::class_name(
        &options.class_name_prefix,
        &canonical_string(&dashed, &values, &pseudos, &at_rules, &const_rules),
    );
    if options.debug_class_names() {
        class_name.push_str(&debug_suffix(&dashed, &pseudos));
    }

    Ok(PreparedRule {
        rule,
        dashed,
        values,
        pseudos,
        at_rules,
        const_rules,
        class_name,
    })
}

impl PreparedRule<'_> {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn origin_path(&self) -> &[String] {
        &self.rule.key_path
    }

    /// Build the LTR and RTL rule text and the priority
    pub fn generate(self, options: &CompileOptions) -> GeneratedRule {
        let ltr_pairs: Vec<Declaration> = self
            .values
            .iter()
            .map(|value| generate_ltr(&self.dashed, value, options))
            .collect();
        let rtl_pairs: Vec<Declaration> = self
            .values
            .iter()
            .filter_map(|value| generate_rtl(&self.dashed, value, options))
            .collect();

        let selector = build_selector(
            &self.class_name,
            &self.pseudos,
            self.at_rules.len() + self.const_rules.len(),
        );
        let mut ltr = wrap_at_rules(
            format!("{}{{{}}}", selector, join_declarations(&ltr_pairs)),
            &self.at_rules,
            &self.const_rules,
        );
        let mut rtl = if rtl_pairs.is_empty() {
            None
        } else {
            Some(wrap_at_rules(
                format!("{}{{{}}}", selector, join_declarations(&rtl_pairs)),
                &self.at_rules,
                &self.const_rules,
            ))
        };

        if options.enable_ltr_rtl_comments {
            if let Some(rtl_text) = rtl.as_mut() {
                ltr = format!("/* @ltr begin */{}/* @ltr end */", ltr);
                *rtl_text = format!("/* @rtl begin */{}/* @rtl end */", rtl_text);
            }
        }

        let priority = rule_priority(&self.dashed, &self.pseudos, &self.at_rules, &self.const_rules);
        debug!(class_name = %self.class_name, priority, "generated rule");

        GeneratedRule {
            class_name: self.class_name,
            style: InjectableStyle::new(priority, ltr, rtl),
            origin_path: self.rule.key_path.clone(),
        }
    }
}

/// The string hashed into a class name; authoring order never reaches it
pub fn canonical_string(
    dashed_property: &str,
    values: &[String],
    pseudos: &[String],
    at_rules: &[String],
    const_rules: &[String],
) -> String {
    let mut modifiers = String::new();
    for condition in pseudos.iter().chain(at_rules).chain(const_rules) {
        modifiers.push_str(condition);
    }
    if modifiers.is_empty() {
        modifiers.push_str("null");
    }

    format!("{}{}{}", dashed_property, values.join(", "), modifiers)
}

fn debug_suffix(dashed_property: &str, pseudos: &[String]) -> String {
    let mut suffix = format!("-{}", dashed_property.trim_start_matches('-'));
    for pseudo in pseudos {
        let name = pseudo.trim_start_matches(':');
        if !name.is_empty() && name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            suffix.push('-');
            suffix.push_str(name);
        }
    }
    suffix
}

fn join_declarations(pairs: &[Declaration]) -> String {
    pairs
        .iter()
        .map(|(property, value)| format!("{}:{}", property, value))
        .collect::<Vec<_>>()
        .join(";")
}

/// `.cls` once per nesting level, one more for `:where(...)` observers, then the pseudos
pub fn build_selector(class_name: &str, pseudos: &[String], nesting: usize) -> String {
    let class_selector = format!(".{}", class_name);
    let mut repeat = 1 + nesting;
    if pseudos.iter().any(|pseudo| pseudo.contains(":where(")) {
        repeat += 1;
    }

    let mut selector = class_selector.repeat(repeat);
    for pseudo in pseudos.iter().filter(|pseudo| *pseudo != THUMB_PSEUDO) {
        selector.push_str(pseudo);
    }

    if pseudos.iter().any(|pseudo| pseudo == THUMB_PSEUDO) {
        return THUMB_VARIANTS
            .iter()
            .map(|variant| format!("{}{}", selector, variant))
            .collect::<Vec<_>>()
            .join(", ");
    }

    selector
}

/// The first at-rule is innermost; constant references wrap outside every at-rule
pub fn wrap_at_rules(block: String, at_rules: &[String], const_rules: &[String]) -> String {
    at_rules
        .iter()
        .chain(const_rules)
        .fold(block, |inner, at_rule| format!("{}{{{}}}", at_rule, inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleValue;
    use crate::tree::Scalar;

    fn rule(property: &str, value: impl Into<Scalar>, conditions: &[&str]) -> Rule {
        let mut key_path = vec![property.to_string()];
        key_path.extend(conditions.iter().map(|c| c.to_string()));
        Rule::new(property, RuleValue::Single(value.into()), key_path)
    }

    #[test]
    fn test_plain_rule() {
        let generated = generate_rule(&rule("color", "red", &[]), &CompileOptions::default()).unwrap();
        let class = &generated.class_name;
        assert!(class.starts_with('x'));
        assert_eq!(generated.style.ltr, format!(".{}{{color:red}}", class));
        assert_eq!(generated.style.rtl, None);
        assert_eq!(generated.style.priority, 3000.0);
    }

    #[test]
    fn test_pseudo_and_at_rule_nesting() {
        let generated = generate_rule(
            &rule("color", "blue", &[":hover", "@media (min-width: 800px)"]),
            &CompileOptions::default(),
        )
        .unwrap();
        let class = &generated.class_name;
        assert_eq!(
            generated.style.ltr,
            format!("@media (min-width: 800px){{.{c}.{c}:hover{{color:blue}}}}", c = class)
        );
        assert_eq!(generated.style.priority, 3000.0 + 130.0 + 200.0);
    }

    #[test]
    fn test_supports_wraps_media() {
        let wrapped = wrap_at_rules(
            ".a{color:red}".to_string(),
            &["@media print".to_string(), "@supports (display: grid)".to_string()],
            &[],
        );
        assert_eq!(wrapped, "@supports (display: grid){@media print{.a{color:red}}}");
    }

    #[test]
    fn test_condition_order_does_not_change_class() {
        let options = CompileOptions::default();
        let a = generate_rule(&rule("color", "red", &[":hover", ":focus"]), &options).unwrap();
        let b = generate_rule(&rule("color", "red", &[":focus", ":hover"]), &options).unwrap();
        assert_eq!(a.class_name, b.class_name);
        assert_eq!(a.style, b.style);
    }

    #[test]
    fn test_legacy_logical_property_mirrors() {
        let generated = generate_rule(&rule("marginStart", 10, &[]), &CompileOptions::default()).unwrap();
        let class = &generated.class_name;
        assert_eq!(generated.style.ltr, format!(".{}{{margin-left:10px}}", class));
        assert_eq!(
            generated.style.rtl.as_deref(),
            Some(format!(".{}{{margin-right:10px}}", class).as_str())
        );
    }

    #[test]
    fn test_fallback_values_join() {
        let fallback = Rule::new(
            "width",
            RuleValue::Fallback(vec!["100vh".into(), "100dvh".into()]),
            vec!["width".to_string()],
        );
        let generated = generate_rule(&fallback, &CompileOptions::default()).unwrap();
        assert!(generated.style.ltr.ends_with("{width:100vh;width:100dvh}"));
    }

    #[test]
    fn test_thumb_expands_to_vendor_pseudos() {
        let selector = build_selector("x1", &["::thumb".to_string()], 0);
        assert_eq!(
            selector,
            ".x1::-webkit-slider-thumb, .x1::-moz-range-thumb, .x1::-ms-thumb"
        );
    }

    #[test]
    fn test_where_observer_adds_class_segment() {
        let selector = build_selector("x1", &[":where(.m:hover *)".to_string()], 0);
        assert_eq!(selector, ".x1.x1:where(.m:hover *)");
    }

    #[test]
    fn test_const_reference_wraps_outermost() {
        let generated = generate_rule(
            &rule("color", "red", &["var(--xbp)", "@media print"]),
            &CompileOptions::default(),
        )
        .unwrap();
        let class = &generated.class_name;
        assert_eq!(
            generated.style.ltr,
            format!("var(--xbp){{@media print{{.{c}.{c}.{c}{{color:red}}}}}}", c = class)
        );
    }

    #[test]
    fn test_debug_class_names() {
        let options = CompileOptions {
            debug: true,
            enable_debug_class_names: true,
            ..Default::default()
        };
        let generated = generate_rule(&rule("backgroundColor", "red", &[":hover"]), &options).unwrap();
        assert!(generated.class_name.ends_with("-background-color-hover"));
    }

    #[test]
    fn test_ltr_rtl_comments() {
        let options = CompileOptions {
            enable_ltr_rtl_comments: true,
            ..Default::default()
        };
        let generated = generate_rule(&rule("marginEnd", 4, &[]), &options).unwrap();
        assert!(generated.style.ltr.starts_with("/* @ltr begin */"));
        assert!(generated.style.rtl.unwrap().ends_with("/* @rtl end */"));
    }
}
