/// Shorthand resolution through the whole compile pipeline
use crate::*;

#[cfg(test)]
mod shorthand_tests {
    use super::*;
    use crate::shorthands::{expand, PropertySpecificity};
    use pretty_assertions::assert_eq;

    fn compile_with(style: StyleTree, resolution: StyleResolution) -> CompileOutput {
        let mut namespaces = Namespaces::new();
        namespaces.insert("root".to_string(), style);
        create(&namespaces, &CompileOptions::with_resolution(resolution)).expect("compile failed")
    }

    fn ltr_of(output: &CompileOutput, key: &str) -> String {
        let class_names = output.namespaces["root"].get(key).unwrap().class_names();
        output.injected[class_names[0]].ltr.clone()
    }

    fn rtl_of(output: &CompileOutput, key: &str) -> Option<String> {
        let class_names = output.namespaces["root"].get(key).unwrap().class_names();
        output.injected[class_names[0]].rtl.clone()
    }

    #[test]
    fn test_margin_then_margin_bottom() {
        let output = compile_with(
            StyleTree::new().with("margin", 10).with("marginBottom", 20),
            StyleResolution::LegacyExpandShorthands,
        );
        let keys: Vec<_> = output.namespaces["root"].styles.keys().cloned().collect();
        assert_eq!(keys, vec!["marginTop", "marginEnd", "marginBottom", "marginStart"]);

        assert!(ltr_of(&output, "marginTop").ends_with("{margin-top:10px}"));
        assert!(ltr_of(&output, "marginBottom").ends_with("{margin-bottom:20px}"));
        assert!(ltr_of(&output, "marginEnd").ends_with("{margin-right:10px}"));
        assert!(rtl_of(&output, "marginEnd").unwrap().ends_with("{margin-left:10px}"));
    }

    #[test]
    fn test_fallback_list_through_box_shorthand() {
        let output = compile_with(
            StyleTree::new().with(
                "margin",
                StyleValue::Fallback(vec![Some("10vh 20px".into()), Some("10dvh 20px".into())]),
            ),
            StyleResolution::LegacyExpandShorthands,
        );

        assert!(ltr_of(&output, "marginTop").ends_with("{margin-top:10vh;margin-top:10dvh}"));
        assert!(ltr_of(&output, "marginStart").ends_with("{margin-left:20px}"));
        assert!(rtl_of(&output, "marginStart").unwrap().ends_with("{margin-right:20px}"));
    }

    #[test]
    fn test_directionless_property_has_no_rtl() {
        let output = compile_with(
            StyleTree::new().with("color", "red"),
            StyleResolution::LegacyExpandShorthands,
        );
        assert_eq!(rtl_of(&output, "color"), None);
    }

    #[test]
    fn test_property_specificity_uses_logical_longhands() {
        let output = compile_with(
            StyleTree::new().with("padding", "1px 2px 3px 4px"),
            StyleResolution::PropertySpecificity,
        );
        let root = &output.namespaces["root"];
        assert!(ltr_of(&output, "paddingTop").ends_with("{padding-top:1px}"));
        assert!(ltr_of(&output, "paddingInlineEnd").ends_with("{padding-inline-end:2px}"));
        assert!(ltr_of(&output, "paddingInlineStart").ends_with("{padding-inline-start:4px}"));
        assert_eq!(root.get("paddingLeft"), Some(&CompiledValue::Null));
        assert_eq!(root.get("paddingRight"), Some(&CompiledValue::Null));
    }

    #[test]
    fn test_application_order_keeps_shorthand() {
        let output = compile_with(
            StyleTree::new().with("padding", "1px 2px"),
            StyleResolution::ApplicationOrder,
        );
        assert!(ltr_of(&output, "padding").ends_with("{padding:1px 2px}"));
        let class_names = output.namespaces["root"].get("padding").unwrap().class_names();
        assert_eq!(output.injected[class_names[0]].priority, 1000.0);
    }

    #[test]
    fn test_list_style_ambiguity() {
        assert!(matches!(
            expand(&PropertySpecificity, "listStyle", Some(&"none disc".into())),
            Err(CompileError::InvalidShorthand { .. })
        ));

        let expansion = expand(&PropertySpecificity, "listStyle", Some(&"inside disc".into())).unwrap();
        assert_eq!(
            expansion,
            vec![
                ("listStyleType".to_string(), Some(Scalar::from("disc"))),
                ("listStylePosition".to_string(), Some(Scalar::from("inside"))),
                ("listStyleImage".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_logical_float_values() {
        let output = compile_with(
            StyleTree::new().with("float", "start"),
            StyleResolution::ApplicationOrder,
        );
        assert!(ltr_of(&output, "float").ends_with("{float:left}"));
        assert!(rtl_of(&output, "float").unwrap().ends_with("{float:right}"));
    }

    #[test]
    fn test_invalid_box_shorthand_fails_compile() {
        let mut namespaces = Namespaces::new();
        namespaces.insert(
            "root".to_string(),
            StyleTree::new().with("margin", "1px, 2px"),
        );
        let options = CompileOptions::with_resolution(StyleResolution::PropertySpecificity);
        assert!(create(&namespaces, &options).is_err());

        let silent = CompileOptions {
            validation: ValidationMode::Silent,
            ..options
        };
        let output = create(&namespaces, &silent).unwrap();
        assert!(output.injected.is_empty());
    }
}
