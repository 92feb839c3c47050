/// Generated CSS text for option-dependent features
use crate::*;

#[cfg(test)]
mod output_tests {
    use super::*;
    use crate::when;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn compile_root(style: StyleTree, options: &CompileOptions) -> CompileOutput {
        let mut namespaces = Namespaces::new();
        namespaces.insert("root".to_string(), style);
        create(&namespaces, options).expect("compile failed")
    }

    fn styles_for<'a>(output: &'a CompileOutput, key: &str) -> Vec<&'a InjectableStyle> {
        output.namespaces["root"]
            .get(key)
            .unwrap()
            .class_names()
            .into_iter()
            .map(|class_name| &output.injected[class_name])
            .collect()
    }

    #[test]
    fn test_media_query_order_rewrites_siblings() {
        let options = CompileOptions {
            enable_media_query_order: true,
            ..Default::default()
        };
        let output = compile_root(
            StyleTree::new().with(
                "width",
                StyleTree::new()
                    .with("default", "100%")
                    .with("@media (min-width: 800px)", "800px")
                    .with("@media (min-width: 1200px)", "1200px"),
            ),
            &options,
        );

        let CompiledValue::Conditional(branches) = output.namespaces["root"].get("width").unwrap() else {
            panic!("expected a conditional value");
        };
        let keys: Vec<_> = branches.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "default",
                "@media (min-width: 800px) and (not (min-width: 1200px))",
                "@media (min-width: 1200px)",
            ]
        );
    }

    #[test]
    fn test_hard_and_soft_media_query_validation() {
        let style = StyleTree::new().with(
            "width",
            StyleTree::new()
                .with("@media screen, print", "1px")
                .with("@media (min-width: 800px)", "2px"),
        );
        let mut namespaces = Namespaces::new();
        namespaces.insert("root".to_string(), style);

        let hard = CompileOptions {
            enable_media_query_order: true,
            ..Default::default()
        };
        assert!(matches!(
            create(&namespaces, &hard),
            Err(CompileError::InvalidMediaQuery { .. })
        ));

        let soft = CompileOptions {
            soft_media_query_validation: true,
            ..hard
        };
        let output = create(&namespaces, &soft).unwrap();
        assert_eq!(output.injected.len(), 2);
    }

    #[test]
    fn test_observer_selector_as_condition() {
        let options = CompileOptions::default();
        let observer = when::ancestor(":hover", None, &options).unwrap();
        let output = compile_root(
            StyleTree::new().with(
                "opacity",
                StyleTree::new().with("default", 0).with(observer.as_str(), 1),
            ),
            &options,
        );

        let styles = styles_for(&output, "opacity");
        let hover = styles.iter().find(|style| style.ltr.contains(":where(")).unwrap();
        let class_name = output.namespaces["root"].get("opacity").unwrap().class_names()[1];
        assert_eq!(
            hover.ltr,
            format!(".{c}.{c}:where(.x-default-marker:hover *){{opacity:1}}", c = class_name)
        );
    }

    #[test]
    fn test_constant_as_condition_key() {
        let options = CompileOptions::default();
        let mut constants = IndexMap::new();
        constants.insert("mobile".to_string(), Scalar::from("@media (max-width: 600px)"));
        let breakpoints = define_consts("tokens.stylex.js//breakpoints", &constants, &options);
        let mobile = &breakpoints.values["mobile"];

        let output = compile_root(
            StyleTree::new().with(
                "fontSize",
                StyleTree::new().with("default", 16).with(mobile.as_str(), 12),
            ),
            &options,
        );

        let styles = styles_for(&output, "fontSize");
        let wrapped = styles[1];
        assert!(wrapped.ltr.starts_with(&format!("{}{{", mobile)));
        assert_eq!(wrapped.priority, 3000.0 + 200.0);
    }

    #[test]
    fn test_font_size_to_rem() {
        let options = CompileOptions {
            enable_font_size_px_to_rem: true,
            ..Default::default()
        };
        let output = compile_root(StyleTree::new().with("fontSize", "24px"), &options);
        assert!(styles_for(&output, "fontSize")[0].ltr.ends_with("{font-size:1.5rem}"));
    }

    #[test]
    fn test_shadow_flipping() {
        let options = CompileOptions {
            enable_legacy_value_flipping: true,
            ..Default::default()
        };
        let output = compile_root(
            StyleTree::new().with("boxShadow", "1px 2px 3px red, -4px 0 2px blue"),
            &options,
        );
        let style = styles_for(&output, "boxShadow")[0];
        assert!(style.ltr.ends_with("{box-shadow:1px 2px 3px red,-4px 0 2px blue}"));
        assert!(style
            .rtl
            .as_deref()
            .unwrap()
            .ends_with("{box-shadow:-1px 2px 3px red,4px 0 2px blue}"));
    }

    #[test]
    fn test_logical_polyfill_maps_inline_properties() {
        let options = CompileOptions {
            enable_logical_styles_polyfill: true,
            ..Default::default()
        };
        let output = compile_root(StyleTree::new().with("marginInlineStart", 8), &options);
        let style = styles_for(&output, "marginInlineStart")[0];
        assert!(style.ltr.ends_with("{margin-left:8px}"));
        assert!(style.rtl.as_deref().unwrap().ends_with("{margin-right:8px}"));
    }

    #[test]
    fn test_vars_and_consts_share_injection_shape() {
        let options = CompileOptions::default();
        let vars = define_vars(
            "theme.js//colors",
            &StyleTree::new().with("accent", "blue"),
            &options,
        )
        .unwrap();
        let mut constants = IndexMap::new();
        constants.insert("gap".to_string(), Scalar::from(8));
        let consts = define_consts("theme.js//spacing", &constants, &options);

        assert!(vars.injected.values().all(|style| !style.is_constant()));
        assert!(consts.injected.values().all(InjectableStyle::is_constant));
        assert!(vars.values["accent"].starts_with("var(--x"));
    }
}
