use serde::{Deserialize, Serialize};

/// A compiled rule ready to be handed to the runtime injector.
///
/// `ltr` always holds the rule text for left-to-right documents. `rtl` is
/// only present when the right-to-left rendition differs. Entries that
/// define a named constant carry `const_key`/`const_val` and an empty `ltr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectableStyle {
    pub priority: f64,
    pub ltr: String,
    pub rtl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub const_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub const_val: Option<String>,
}

impl InjectableStyle {
    pub fn new(priority: f64, ltr: impl Into<String>, rtl: Option<String>) -> Self {
        Self {
            priority,
            ltr: ltr.into(),
            rtl,
            const_key: None,
            const_val: None,
        }
    }

    /// A constant definition. Produces no visible rule.
    pub fn constant(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            priority: 0.0,
            ltr: String::new(),
            rtl: None,
            const_key: Some(key.into()),
            const_val: Some(value.into()),
        }
    }

    /// A present key marks a constant; a missing value defines it as empty
    pub fn is_constant(&self) -> bool {
        self.const_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_has_no_rule_text() {
        let style = InjectableStyle::constant("xknown", "blue");
        assert!(style.is_constant());
        assert!(style.ltr.is_empty());
        assert_eq!(style.rtl, None);
    }

    #[test]
    fn test_key_alone_marks_a_constant() {
        let style = InjectableStyle {
            const_val: None,
            ..InjectableStyle::constant("xempty", "")
        };
        assert!(style.is_constant());
        assert!(!InjectableStyle::new(0.0, ".x{}", None).is_constant());
    }

    #[test]
    fn test_serializes_camel_case() {
        let style = InjectableStyle::constant("xknown", "blue");
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["constKey"], "xknown");
        assert_eq!(json["constVal"], "blue");

        let rule = InjectableStyle::new(3000.0, ".x1{color:red}", None);
        let json = serde_json::to_value(&rule).unwrap();
        assert!(json.get("constKey").is_none());
        assert_eq!(json["rtl"], serde_json::Value::Null);
    }
}
