//! Namespace compilation entry point
use crate::error::CompileResult;
use crate::flatten::flatten_raw_style_object;
use crate::generate::{prepare_rule, GeneratedRule};
use crate::hash;
use crate::options::CompileOptions;
use crate::rules::{CompiledRule, Rule};
use crate::shorthands::{strategy_for, ShorthandStrategy};
use crate::tree::{namespaces_from_json, Namespaces, StyleTree};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use stylekit_common::InjectableStyle;
use tracing::{debug, info, instrument};

/// A generated class with its style and the key paths that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledEntry {
    pub class_name: String,
    pub style: InjectableStyle,
    /// Every distinct key path that produced this class
    pub origin_paths: Vec<Vec<String>>,
}

/// Compiled value of one namespace key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompiledValue {
    Null,
    Class(String),
    /// Condition key → class, `None` where the condition unsets the property
    Conditional(IndexMap<String, Option<String>>),
}

impl CompiledValue {
    /// Every class referenced by this value
    pub fn class_names(&self) -> Vec<&str> {
        match self {
            CompiledValue::Null => Vec::new(),
            CompiledValue::Class(class_name) => vec![class_name.as_str()],
            CompiledValue::Conditional(branches) => {
                branches.values().filter_map(|class| class.as_deref()).collect()
            }
        }
    }
}

/// The `$$css` marker: `true`, or a source location in debug builds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CssMarker {
    Compiled(bool),
    Source(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledNamespace {
    #[serde(flatten)]
    pub styles: IndexMap<String, CompiledValue>,
    #[serde(rename = "$$css")]
    pub marker: CssMarker,
}

impl CompiledNamespace {
    pub fn get(&self, key: &str) -> Option<&CompiledValue> {
        self.styles.get(key)
    }
}

/// Result of one `create` call
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOutput {
    pub namespaces: IndexMap<String, CompiledNamespace>,
    /// Class name → style to inject, in generation order
    pub injected: IndexMap<String, InjectableStyle>,
    /// Class name → authored key path, for devtools
    pub class_paths: IndexMap<String, Vec<String>>,
}

/// Compiles namespaces and caches every generated class
///
/// The cache is keyed by class name, so identical rules from different
/// namespaces or different calls are generated once.
pub struct StyleCompiler {
    options: CompileOptions,
    strategy: Box<dyn ShorthandStrategy>,
    entries: IndexMap<String, CompiledEntry>,
}

impl StyleCompiler {
    pub fn new(options: CompileOptions) -> Self {
        let strategy = strategy_for(options.style_resolution);
        Self {
            options,
            strategy,
            entries: IndexMap::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Cached entry for a class name
    pub fn entry(&self, class_name: &str) -> Option<&CompiledEntry> {
        self.entries.get(class_name)
    }

    pub fn cache_len(&self) -> usize {
        self.entries.len()
    }

    /// Compile `{ namespace: { ...styles } }` given as JSON
    pub fn create_from_json(&mut self, value: serde_json::Value) -> CompileResult<CompileOutput> {
        let namespaces = namespaces_from_json(value)?;
        self.create(&namespaces)
    }

    #[instrument(skip(self, namespaces), fields(namespaces = namespaces.len()))]
    pub fn create(&mut self, namespaces: &Namespaces) -> CompileResult<CompileOutput> {
        info!(
            resolution = self.strategy.name(),
            "compiling style namespaces"
        );

        let mut output = CompileOutput::default();
        for (name, style) in namespaces {
            let namespace = self.compile_namespace(name, style, &mut output)?;
            output.namespaces.insert(name.clone(), namespace);
        }

        if self.options.test {
            output.injected.clear();
        }

        info!(
            classes = output.injected.len(),
            cached = self.entries.len(),
            "compiled style namespaces"
        );
        Ok(output)
    }

    fn compile_namespace(
        &mut self,
        name: &str,
        style: &StyleTree,
        output: &mut CompileOutput,
    ) -> CompileResult<CompiledNamespace> {
        let flattened = flatten_raw_style_object(style, self.strategy.as_ref(), &self.options)?;
        let mut styles = IndexMap::with_capacity(flattened.len());

        for (key, pre_rule) in &flattened {
            let compiled = pre_rule.compiled_with(|rule| self.compile_rule(rule))?;

            for generated in compiled.generated() {
                output
                    .injected
                    .entry(generated.class_name.clone())
                    .or_insert_with(|| generated.style.clone());
                output
                    .class_paths
                    .entry(generated.class_name.clone())
                    .or_insert_with(|| generated.origin_path.clone());
            }

            let value = match compiled {
                CompiledRule::Null => CompiledValue::Null,
                CompiledRule::Single(generated) => CompiledValue::Class(generated.class_name),
                CompiledRule::Conditional(branches) => CompiledValue::Conditional(
                    branches
                        .into_iter()
                        .map(|(condition, generated)| (condition, generated.map(|g| g.class_name)))
                        .collect(),
                ),
            };
            styles.insert(self.output_key(key), value);
        }

        if let Some(dev_class) = self.dev_class_name(name) {
            styles.insert(dev_class.clone(), CompiledValue::Class(dev_class));
        }

        Ok(CompiledNamespace {
            styles,
            marker: self.css_marker(name),
        })
    }

    fn compile_rule(&mut self, rule: &Rule) -> CompileResult<GeneratedRule> {
        let prepared = prepare_rule(rule, &self.options)?;

        if let Some(entry) = self.entries.get_mut(prepared.class_name()) {
            debug!(class_name = %entry.class_name, "cache hit");
            if !entry.origin_paths.iter().any(|path| path == prepared.origin_path()) {
                entry.origin_paths.push(prepared.origin_path().to_vec());
            }
            return Ok(GeneratedRule {
                class_name: entry.class_name.clone(),
                style: entry.style.clone(),
                origin_path: prepared.origin_path().to_vec(),
            });
        }

        let generated = prepared.generate(&self.options);
        self.entries.insert(
            generated.class_name.clone(),
            CompiledEntry {
                class_name: generated.class_name.clone(),
                style: generated.style.clone(),
                origin_paths: vec![generated.origin_path.clone()],
            },
        );
        Ok(generated)
    }

    fn output_key(&self, key: &str) -> String {
        if self.options.enable_minified_keys && !key.starts_with("--") {
            format!("k{}", hash::hash(key))
        } else {
            key.to_string()
        }
    }

    /// `Button__root` for namespace `root` in `Button.tsx`
    fn dev_class_name(&self, namespace: &str) -> Option<String> {
        if !(self.options.dev && self.options.enable_dev_class_names) {
            return None;
        }
        let filename = self.options.filename.as_deref()?;
        let stem = Path::new(filename).file_stem()?.to_string_lossy();
        Some(format!("{}__{}", stem, namespace))
    }

    fn css_marker(&self, namespace: &str) -> CssMarker {
        if self.options.debug && self.options.enable_debug_data_prop {
            let file = self
                .options
                .filename
                .as_deref()
                .and_then(|filename| Path::new(filename).file_name())
                .map(|name| name.to_string_lossy().into_owned());
            if let Some(file) = file {
                return CssMarker::Source(format!("{}:{}", file, namespace));
            }
        }
        CssMarker::Compiled(true)
    }
}

impl Default for StyleCompiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

/// Compile namespaces with a fresh compiler
pub fn create(namespaces: &Namespaces, options: &CompileOptions) -> CompileResult<CompileOutput> {
    StyleCompiler::new(options.clone()).create(namespaces)
}
