/// Determinism tests: same visual rule, same class, regardless of how or
/// where it was authored
use crate::*;

#[cfg(test)]
mod determinism_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(style: StyleTree) -> CompileOutput {
        let mut namespaces = Namespaces::new();
        namespaces.insert("root".to_string(), style);
        create(&namespaces, &CompileOptions::default()).expect("compile failed")
    }

    fn sorted_classes(output: &CompileOutput) -> Vec<String> {
        let mut classes: Vec<String> = output.injected.keys().cloned().collect();
        classes.sort();
        classes
    }

    #[test]
    fn test_repeated_compiles_are_identical() {
        let style = || {
            StyleTree::new()
                .with("display", "flex")
                .with("padding", "4px 8px")
                .with(
                    "color",
                    StyleTree::new()
                        .with("default", "black")
                        .with(":hover", "blue")
                        .with("@media (max-width: 600px)", "red"),
                )
        };

        let results: Vec<CompileOutput> = (0..5).map(|_| compile(style())).collect();
        for i in 1..results.len() {
            assert_eq!(results[0], results[i], "compile {} differs from compile 0", i);
        }
    }

    #[test]
    fn test_condition_key_order_does_not_change_classes() {
        let forward = compile(StyleTree::new().with(
            "color",
            StyleTree::new()
                .with("default", "black")
                .with(":hover", "blue")
                .with(":focus", "green"),
        ));
        let reversed = compile(StyleTree::new().with(
            "color",
            StyleTree::new()
                .with(":focus", "green")
                .with(":hover", "blue")
                .with("default", "black"),
        ));

        assert_eq!(sorted_classes(&forward), sorted_classes(&reversed));
        for class_name in forward.injected.keys() {
            assert_eq!(forward.injected[class_name], reversed.injected[class_name]);
        }
    }

    #[test]
    fn test_nested_pseudo_order_does_not_change_class() {
        let hover_focus = compile(StyleTree::new().with(
            "color",
            StyleTree::new().with(
                ":hover",
                StyleTree::new().with(":focus", "blue"),
            ),
        ));
        let focus_hover = compile(StyleTree::new().with(
            "color",
            StyleTree::new().with(
                ":focus",
                StyleTree::new().with(":hover", "blue"),
            ),
        ));

        assert_eq!(sorted_classes(&hover_focus), sorted_classes(&focus_hover));
        let class_name = &sorted_classes(&hover_focus)[0];
        let ltr = &hover_focus.injected[class_name].ltr;
        assert!(ltr.ends_with(":focus:hover{color:blue}"), "unexpected rule {}", ltr);
    }

    #[test]
    fn test_at_rule_order_does_not_change_class() {
        let media_first = compile(StyleTree::new().with(
            "color",
            StyleTree::new().with(
                "@media print",
                StyleTree::new().with("@supports (color: red)", "red"),
            ),
        ));
        let supports_first = compile(StyleTree::new().with(
            "color",
            StyleTree::new().with(
                "@supports (color: red)",
                StyleTree::new().with("@media print", "red"),
            ),
        ));

        assert_eq!(sorted_classes(&media_first), sorted_classes(&supports_first));
        let style = media_first.injected.values().next().unwrap();
        assert!(style.ltr.starts_with("@supports (color: red){@media print{"));
    }

    #[test]
    fn test_equivalent_values_share_a_class() {
        let spaced = compile(StyleTree::new().with("boxShadow", "0 0  4px rgba( 0, 0, 0, 0.5 )"));
        let compact = compile(StyleTree::new().with("boxShadow", "0 0 4px rgba(0,0,0,.5)"));
        assert_eq!(sorted_classes(&spaced), sorted_classes(&compact));

        let number = compile(StyleTree::new().with("width", 10));
        let text = compile(StyleTree::new().with("width", "10px"));
        assert_eq!(sorted_classes(&number), sorted_classes(&text));

        let zero = compile(StyleTree::new().with("marginTop", 0));
        let zero_px = compile(StyleTree::new().with("marginTop", "0px"));
        assert_eq!(sorted_classes(&zero), sorted_classes(&zero_px));
        assert!(zero.injected.values().all(|style| style.ltr.ends_with("{margin-top:0}")));

        let millis = compile(StyleTree::new().with("transitionDuration", 500));
        let text_millis = compile(StyleTree::new().with("transitionDuration", "500ms"));
        let seconds = compile(StyleTree::new().with("transitionDuration", ".5s"));
        assert_eq!(sorted_classes(&millis), sorted_classes(&text_millis));
        assert_eq!(sorted_classes(&millis), sorted_classes(&seconds));
    }

    #[test]
    fn test_same_rule_from_two_namespaces() {
        let mut namespaces = Namespaces::new();
        namespaces.insert("a".into(), StyleTree::new().with("color", "red"));
        namespaces.insert(
            "b".into(),
            StyleTree::new().with("color", StyleTree::new().with("default", "red")),
        );
        let output = create(&namespaces, &CompileOptions::default()).unwrap();

        assert_eq!(output.injected.len(), 1);
        assert_eq!(
            output.namespaces["a"].get("color").unwrap().class_names(),
            output.namespaces["b"].get("color").unwrap().class_names()
        );
    }

    #[test]
    fn test_prefix_only_changes_the_prefix() {
        let style = StyleTree::new().with("color", "red");
        let mut namespaces = Namespaces::new();
        namespaces.insert("root".to_string(), style);

        let default = create(&namespaces, &CompileOptions::default()).unwrap();
        let prefixed = create(
            &namespaces,
            &CompileOptions {
                class_name_prefix: "sk".into(),
                ..Default::default()
            },
        )
        .unwrap();

        let plain = default.injected.keys().next().unwrap();
        let custom = prefixed.injected.keys().next().unwrap();
        assert_eq!(plain.strip_prefix('x'), custom.strip_prefix("sk"));
    }
}
