//! Flattened rule model
//!
//! One authored property becomes zero, one or many conditional declarations.
//! `PreRule` is the closed sum of those shapes; `compiled()` turns each shape
//! into generated CSS.

use crate::error::CompileResult;
use crate::generate::{generate_rule, GeneratedRule};
use crate::options::CompileOptions;
use crate::tree::Scalar;

pub const DEFAULT_CONDITION: &str = "default";

/// Value of a single rule; a fallback chain keeps every value in order
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    Single(Scalar),
    Fallback(Vec<Scalar>),
}

impl RuleValue {
    pub fn values(&self) -> &[Scalar] {
        match self {
            RuleValue::Single(value) => std::slice::from_ref(value),
            RuleValue::Fallback(values) => values,
        }
    }
}

/// One declaration under a condition key path
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub property: String,
    pub value: RuleValue,
    /// Conditions in authoring order, with the property name itself included
    pub key_path: Vec<String>,
}

impl Rule {
    pub fn new(property: impl Into<String>, value: RuleValue, key_path: Vec<String>) -> Self {
        Self {
            property: property.into(),
            value,
            key_path,
        }
    }

    /// Pseudo-classes and pseudo-elements in canonical order
    pub fn pseudos(&self) -> Vec<String> {
        sort_pseudos(
            self.key_path
                .iter()
                .filter(|key| key.starts_with(':'))
                .cloned()
                .collect(),
        )
    }

    /// At-rules, alphabetical
    pub fn at_rules(&self) -> Vec<String> {
        sort_at_rules(
            self.key_path
                .iter()
                .filter(|key| key.starts_with('@'))
                .cloned()
                .collect(),
        )
    }

    /// Constant references used as conditions, e.g. `var(--xabc)`
    pub fn const_rules(&self) -> Vec<String> {
        let mut consts: Vec<String> = self
            .key_path
            .iter()
            .filter(|key| key.starts_with("var(--"))
            .cloned()
            .collect();
        consts.sort();
        consts
    }

    pub fn compiled(&self, options: &CompileOptions) -> CompileResult<GeneratedRule> {
        generate_rule(self, options)
    }
}

/// Consecutive single-colon pseudo-classes are alphabetised together; a
/// pseudo-element keeps its position and splits the runs around it.
pub fn sort_pseudos(pseudos: Vec<String>) -> Vec<String> {
    if pseudos.len() < 2 {
        return pseudos;
    }

    let mut sorted = Vec::with_capacity(pseudos.len());
    let mut run: Vec<String> = Vec::new();

    for pseudo in pseudos {
        if pseudo.starts_with("::") {
            run.sort();
            sorted.append(&mut run);
            sorted.push(pseudo);
        } else {
            run.push(pseudo);
        }
    }
    run.sort();
    sorted.append(&mut run);

    sorted
}

/// `default` first, everything else alphabetical
pub fn sort_at_rules(at_rules: Vec<String>) -> Vec<String> {
    let (mut defaults, mut rest): (Vec<String>, Vec<String>) = at_rules
        .into_iter()
        .partition(|rule| rule == DEFAULT_CONDITION);
    rest.sort();
    defaults.truncate(1);
    defaults.append(&mut rest);
    defaults
}

/// One branch of a `RuleSet`
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Conditions leading to this branch, outermost first
    pub conditions: Vec<String>,
    /// Never a nested `PreRule::Set`
    pub rule: PreRule,
}

impl Branch {
    /// `default` when unconditioned, otherwise the non-default conditions joined by `_`
    pub fn condition_key(&self) -> String {
        let conditions: Vec<&str> = self
            .conditions
            .iter()
            .map(String::as_str)
            .filter(|condition| *condition != DEFAULT_CONDITION)
            .collect();

        if conditions.is_empty() {
            DEFAULT_CONDITION.to_string()
        } else {
            conditions.join("_")
        }
    }
}

/// The same property under several conditions
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    branches: Vec<Branch>,
}

impl RuleSet {
    /// Build from `(condition, rule)` pairs, flattening nested sets.
    ///
    /// A set of nothing but null rules collapses to a null rule and a single
    /// branch collapses to its rule.
    pub fn create(items: Vec<(String, PreRule)>) -> PreRule {
        let mut branches = Vec::with_capacity(items.len());

        for (condition, rule) in items {
            match rule {
                PreRule::Set(set) => {
                    for branch in set.branches {
                        let mut conditions = Vec::with_capacity(branch.conditions.len() + 1);
                        conditions.push(condition.clone());
                        conditions.extend(branch.conditions);
                        branches.push(Branch {
                            conditions,
                            rule: branch.rule,
                        });
                    }
                }
                other => branches.push(Branch {
                    conditions: vec![condition],
                    rule: other,
                }),
            }
        }

        if branches.iter().all(|branch| branch.rule.is_null()) {
            return PreRule::Null;
        }
        if branches.len() == 1 {
            if let Some(branch) = branches.pop() {
                return branch.rule;
            }
        }

        PreRule::Set(RuleSet { branches })
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

/// Result of flattening one authored property
#[derive(Debug, Clone, PartialEq)]
pub enum PreRule {
    Null,
    Rule(Rule),
    Set(RuleSet),
}

/// Generated output of a `PreRule`
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledRule {
    Null,
    Single(GeneratedRule),
    /// One entry per branch, keyed by `Branch::condition_key`
    Conditional(Vec<(String, Option<GeneratedRule>)>),
}

impl CompiledRule {
    pub fn generated(&self) -> Vec<&GeneratedRule> {
        match self {
            CompiledRule::Null => Vec::new(),
            CompiledRule::Single(rule) => vec![rule],
            CompiledRule::Conditional(branches) => {
                branches.iter().filter_map(|(_, rule)| rule.as_ref()).collect()
            }
        }
    }
}

impl PreRule {
    pub fn is_null(&self) -> bool {
        matches!(self, PreRule::Null)
    }

    pub fn compiled(&self, options: &CompileOptions) -> CompileResult<CompiledRule> {
        self.compiled_with(|rule| rule.compiled(options))
    }

    /// Compile with a custom rule generator, e.g. one backed by a cache
    pub fn compiled_with<F>(&self, mut generate: F) -> CompileResult<CompiledRule>
    where
        F: FnMut(&Rule) -> CompileResult<GeneratedRule>,
    {
        match self {
            PreRule::Null => Ok(CompiledRule::Null),
            PreRule::Rule(rule) => Ok(CompiledRule::Single(generate(rule)?)),
            PreRule::Set(set) => {
                let mut compiled = Vec::with_capacity(set.branches.len());
                for branch in &set.branches {
                    let generated = match &branch.rule {
                        PreRule::Rule(rule) => Some(generate(rule)?),
                        _ => None,
                    };
                    compiled.push((branch.condition_key(), generated));
                }
                Ok(CompiledRule::Conditional(compiled))
            }
        }
    }
}
