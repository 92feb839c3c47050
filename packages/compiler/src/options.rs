use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "stylekit.config.json";

/// How shorthand properties are resolved into atomic rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleResolution {
    /// Keep shorthands and null every longhand they reset
    #[default]
    ApplicationOrder,
    /// Expand shorthands into standard logical longhands
    PropertySpecificity,
    /// Expand shorthands into the legacy start/end longhands
    LegacyExpandShorthands,
}

/// What to do with values that cannot be decomposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Throw,
    Warn,
    Silent,
}

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Prefix of every generated class name
    pub class_name_prefix: String,

    pub dev: bool,
    pub debug: bool,
    /// Produce namespaces without any injectable styles
    pub test: bool,

    /// Append a readable property suffix to class names (requires `debug`)
    pub enable_debug_class_names: bool,
    /// Add a `File__namespace` class to each namespace (requires `dev`)
    pub enable_dev_class_names: bool,
    /// Mark namespaces with their source location (requires `debug`)
    pub enable_debug_data_prop: bool,

    pub enable_font_size_px_to_rem: bool,

    /// Rewrite sibling `@media` conditions so the last one wins
    pub enable_media_query_order: bool,
    /// Fall back to the untouched tree when media queries cannot be ordered
    pub soft_media_query_validation: bool,

    /// Mirror shadow offsets and resize cursors in RTL rules
    pub enable_legacy_value_flipping: bool,
    /// Translate inline logical properties to physical ones
    pub enable_logical_styles_polyfill: bool,
    #[serde(rename = "enableLTRRTLComments")]
    pub enable_ltr_rtl_comments: bool,
    pub enable_minified_keys: bool,

    pub style_resolution: StyleResolution,
    pub validation: ValidationMode,

    /// Source file of the styles being compiled, used for dev/debug output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            class_name_prefix: "x".to_string(),
            dev: false,
            debug: false,
            test: false,
            enable_debug_class_names: false,
            enable_dev_class_names: false,
            enable_debug_data_prop: false,
            enable_font_size_px_to_rem: false,
            enable_media_query_order: false,
            soft_media_query_validation: false,
            enable_legacy_value_flipping: false,
            enable_logical_styles_polyfill: false,
            enable_ltr_rtl_comments: false,
            enable_minified_keys: false,
            style_resolution: StyleResolution::default(),
            validation: ValidationMode::default(),
            filename: None,
        }
    }
}

impl CompileOptions {
    /// Options for a given shorthand resolution strategy
    pub fn with_resolution(style_resolution: StyleResolution) -> Self {
        Self {
            style_resolution,
            ..Default::default()
        }
    }

    /// Load options from `stylekit.config.json` in a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            Self::from_json(&content)
                .with_context(|| format!("parsing {}", config_path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(source: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub(crate) fn debug_class_names(&self) -> bool {
        self.debug && self.enable_debug_class_names
    }
}
