pub mod compiler;
pub mod error;
pub mod flatten;
pub mod generate;
pub mod hash;
pub mod media_query_order;
pub mod options;
pub mod physical_rtl;
pub mod priority;
pub mod rules;
pub mod shorthands;
pub mod themes;
pub mod transform_value;
pub mod tree;
pub mod utils;
pub mod value_parser;
pub mod when;

#[cfg(test)]
mod tests_determinism;

#[cfg(test)]
mod tests_shorthands;

#[cfg(test)]
mod tests_output;

pub use compiler::{
    create, CompileOutput, CompiledEntry, CompiledNamespace, CompiledValue, CssMarker,
    StyleCompiler,
};
pub use error::{CompileError, CompileResult};
pub use flatten::{flatten_raw_style_object, FlatStyles};
pub use generate::{generate_rule, GeneratedRule};
pub use options::{CompileOptions, StyleResolution, ValidationMode};
pub use rules::{CompiledRule, PreRule, Rule, RuleSet, RuleValue};
pub use shorthands::{strategy_for, ShorthandStrategy};
pub use themes::{define_consts, define_vars, ThemeOutput};
pub use tree::{namespaces_from_json, Namespaces, Scalar, StyleTree, StyleValue};
pub use stylekit_common::InjectableStyle;
