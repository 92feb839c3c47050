//! Constants and variables built on the same hashing and injection machinery
use crate::error::{CompileError, CompileResult};
use crate::generate::wrap_at_rules;
use crate::hash;
use crate::options::CompileOptions;
use crate::rules::{sort_at_rules, DEFAULT_CONDITION};
use crate::transform_value::{format_number, transform_value};
use crate::tree::{Scalar, StyleTree, StyleValue};
use indexmap::IndexMap;
use serde::Serialize;
use stylekit_common::InjectableStyle;
use tracing::debug;

pub const THEME_NAME_KEY: &str = "__themeName__";
const ROOT_SELECTOR: &str = ":root";
const AT_RULE_PRIORITY: f64 = 0.1;

/// Values to reference from styles plus the styles to inject
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThemeOutput {
    /// Authored key → `var(--…)` reference
    pub values: IndexMap<String, String>,
    pub injected: IndexMap<String, InjectableStyle>,
}

/// Define named constants
///
/// Each constant is referenced as `var(--key)` and substituted by the runtime
/// at injection time. A constant holding an at-rule such as
/// `@media (max-width: 600px)` can be used as a condition key.
pub fn define_consts(
    export_id: &str,
    constants: &IndexMap<String, Scalar>,
    options: &CompileOptions,
) -> ThemeOutput {
    let mut output = ThemeOutput::default();

    for (key, value) in constants {
        let const_key = hash::class_name(&options.class_name_prefix, &format!("{}.{}", export_id, key));
        let const_val = match value {
            Scalar::Text(text) => text.trim().to_string(),
            Scalar::Number(number) => format_number(*number),
        };

        debug!(key = %key, const_key = %const_key, "defined constant");
        output
            .values
            .insert(key.clone(), format!("var(--{})", const_key));
        output
            .injected
            .insert(const_key.clone(), InjectableStyle::constant(const_key, const_val));
    }

    output
}

/// Define custom properties, optionally varying by at-rule
///
/// ```text
/// { color: { default: "blue", "@media (prefers-color-scheme: dark)": "lightblue" } }
/// ```
/// becomes `:root, .xtheme{--xa:blue;}` and
/// `@media (prefers-color-scheme: dark){:root, .xtheme{--xa:lightblue;}}`.
/// The theme class keeps each group's selector distinct.
pub fn define_vars(export_id: &str, vars: &StyleTree, options: &CompileOptions) -> CompileResult<ThemeOutput> {
    let theme_name = hash::class_name(&options.class_name_prefix, export_id);
    let mut output = ThemeOutput::default();

    // at-rule path → declarations
    let mut blocks: IndexMap<Vec<String>, Vec<String>> = IndexMap::new();

    for (key, value) in vars.iter() {
        let var_name = format!(
            "--{}",
            hash::class_name(&options.class_name_prefix, &format!("{}.{}", export_id, key))
        );
        collect_declarations(&var_name, value, &mut Vec::new(), &mut blocks, options)?;
        output
            .values
            .insert(key.clone(), format!("var({})", var_name));
    }
    output
        .values
        .insert(THEME_NAME_KEY.to_string(), theme_name.clone());

    let selector = format!("{}, .{}", ROOT_SELECTOR, theme_name);
    for (at_rules, declarations) in blocks {
        let block = format!("{}{{{}}}", selector, declarations.concat());
        let sorted = sort_at_rules(at_rules);
        let (id, priority) = if sorted.is_empty() {
            (theme_name.clone(), 0.0)
        } else {
            (
                format!("{}-{}", theme_name, hash::hash(&sorted.concat())),
                AT_RULE_PRIORITY,
            )
        };
        let ltr = wrap_at_rules(block, &sorted, &[]);
        output
            .injected
            .insert(id, InjectableStyle::new(priority, ltr, None));
    }

    debug!(theme = %theme_name, count = output.injected.len(), "defined variables");
    Ok(output)
}

fn collect_declarations(
    var_name: &str,
    value: &StyleValue,
    at_rules: &mut Vec<String>,
    blocks: &mut IndexMap<Vec<String>, Vec<String>>,
    options: &CompileOptions,
) -> CompileResult<()> {
    match value {
        StyleValue::Null => Ok(()),
        StyleValue::Scalar(scalar) => {
            let css_value = transform_value(var_name, scalar, options)?;
            blocks
                .entry(at_rules.clone())
                .or_default()
                .push(format!("{}:{};", var_name, css_value));
            Ok(())
        }
        StyleValue::Fallback(_) => Err(CompileError::invalid_style_value(
            var_name,
            "variables cannot hold fallback lists",
        )),
        StyleValue::Conditional(conditions) => {
            for (condition, inner) in conditions.iter() {
                if condition == DEFAULT_CONDITION {
                    collect_declarations(var_name, inner, at_rules, blocks, options)?;
                } else if condition.starts_with('@') {
                    at_rules.push(condition.clone());
                    let result = collect_declarations(var_name, inner, at_rules, blocks, options);
                    at_rules.pop();
                    result?;
                } else {
                    return Err(CompileError::invalid_style_value(
                        var_name,
                        format!("'{}' is not an at-rule", condition),
                    ));
                }
            }
            Ok(())
        }
    }
}
