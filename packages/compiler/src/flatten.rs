//! Flattening authored style trees into `(property, PreRule)` pairs
use crate::error::{CompileError, CompileResult};
use crate::media_query_order::order_media_queries;
use crate::options::{CompileOptions, ValidationMode};
use crate::rules::{PreRule, Rule, RuleSet, RuleValue};
use crate::shorthands::{self, Expansion, ShorthandStrategy};
use crate::tree::{Scalar, StyleTree, StyleValue};
use crate::utils::unwrap_var;
use crate::value_parser::has_unclosed_function;
use indexmap::IndexMap;
use tracing::warn;

/// Flattened properties in first-seen order. A later value for the same
/// property replaces the earlier one in place.
pub type FlatStyles = IndexMap<String, PreRule>;

/// Flatten one namespace
pub fn flatten_raw_style_object(
    style: &StyleTree,
    strategy: &dyn ShorthandStrategy,
    options: &CompileOptions,
) -> CompileResult<FlatStyles> {
    let flattener = Flattener { strategy, options };

    if options.enable_media_query_order {
        let ordered = order_media_queries(style, options)?;
        flattener.flatten(&ordered, &[])
    } else {
        flattener.flatten(style, &[])
    }
}

struct Flattener<'a> {
    strategy: &'a dyn ShorthandStrategy,
    options: &'a CompileOptions,
}

impl Flattener<'_> {
    fn flatten(&self, style: &StyleTree, key_path: &[String]) -> CompileResult<FlatStyles> {
        let mut flattened = FlatStyles::new();

        for (raw_key, value) in style.iter() {
            let key = unwrap_var(raw_key)
                .filter(|inner| inner.starts_with("--"))
                .unwrap_or(raw_key.as_str());

            match value {
                StyleValue::Null | StyleValue::Scalar(_) => {
                    let scalar = match value {
                        StyleValue::Scalar(scalar) => Some(scalar),
                        _ => None,
                    };
                    let pairs = self.recover(key, self.expand(key, scalar))?;
                    for (property, value) in pairs {
                        let path = extend_path(key_path, key, &property);
                        let rule = match value {
                            Some(value) => {
                                PreRule::Rule(Rule::new(property.as_str(), RuleValue::Single(value), path))
                            }
                            None => PreRule::Null,
                        };
                        flattened.insert(property, rule);
                    }
                }

                StyleValue::Fallback(items) => {
                    let expansions = self.recover(
                        key,
                        items
                            .iter()
                            .map(|item| self.expand(key, item.as_ref()))
                            .collect::<CompileResult<Vec<_>>>(),
                    )?;

                    for (property, values) in merge_fallbacks(expansions) {
                        let path = extend_path(key_path, key, &property);
                        let rule = match values.len() {
                            0 => PreRule::Null,
                            1 => PreRule::Rule(Rule::new(
                                property.as_str(),
                                RuleValue::Single(values[0].clone()),
                                path,
                            )),
                            _ => PreRule::Rule(Rule::new(
                                property.as_str(),
                                RuleValue::Fallback(values),
                                path,
                            )),
                        };
                        flattened.insert(property, rule);
                    }
                }

                // Legacy form: `{ ":hover": { color: "red" } }`
                StyleValue::Conditional(inner) if is_condition(key) => {
                    let mut path = key_path.to_vec();
                    path.push(raw_key.clone());
                    for (property, rule) in self.flatten(inner, &path)? {
                        flattened.insert(format!("{}_{}", key, property), rule);
                    }
                }

                // Modern form: `{ color: { default: "red", ":hover": "blue" } }`
                StyleValue::Conditional(conditions) => {
                    let mut equivalent: IndexMap<String, Vec<(String, PreRule)>> = IndexMap::new();

                    for (condition, inner) in conditions.iter() {
                        let path = if key_path.is_empty() {
                            vec![key.to_string(), condition.clone()]
                        } else {
                            let mut path = key_path.to_vec();
                            path.push(condition.clone());
                            path
                        };

                        let single = StyleTree::new().with(key, inner.clone());
                        for (property, rule) in self.flatten(&single, &path)? {
                            equivalent
                                .entry(property)
                                .or_default()
                                .push((condition.clone(), rule));
                        }
                    }

                    for (property, rules) in equivalent {
                        flattened.insert(property, RuleSet::create(rules));
                    }
                }
            }
        }

        Ok(flattened)
    }

    fn expand(&self, key: &str, value: Option<&Scalar>) -> CompileResult<Expansion> {
        if let Some(text) = value.and_then(Scalar::as_text) {
            if has_unclosed_function(text) {
                return Err(CompileError::unclosed_function(key, text));
            }
        }
        shorthands::expand(self.strategy, key, value)
    }

    /// Apply the validation mode to a recoverable error
    fn recover<T: Default>(&self, key: &str, result: CompileResult<T>) -> CompileResult<T> {
        match result {
            Err(error) if error.is_recoverable() => match self.options.validation {
                ValidationMode::Throw => Err(error),
                ValidationMode::Warn => {
                    warn!(property = key, %error, "skipping invalid style");
                    Ok(T::default())
                }
                ValidationMode::Silent => Ok(T::default()),
            },
            other => other,
        }
    }
}

fn is_condition(key: &str) -> bool {
    key.starts_with(':') || key.starts_with('@')
}

/// Replace the authored key with the expanded property, or append the property
fn extend_path(key_path: &[String], key: &str, property: &str) -> Vec<String> {
    if key_path.iter().any(|segment| segment == key) {
        key_path
            .iter()
            .map(|segment| {
                if segment == key {
                    property.to_string()
                } else {
                    segment.clone()
                }
            })
            .collect()
    } else {
        let mut path = key_path.to_vec();
        path.push(property.to_string());
        path
    }
}

/// Group every expansion by longhand, keeping distinct non-null values in order
fn merge_fallbacks(expansions: Vec<Expansion>) -> IndexMap<String, Vec<Scalar>> {
    let mut merged: IndexMap<String, Vec<Scalar>> = IndexMap::new();
    for expansion in expansions {
        for (property, value) in expansion {
            let values = merged.entry(property).or_default();
            if let Some(value) = value {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
        }
    }
    merged
}
