/// Property tests over generated style trees
///
/// - Any permutation of keys yields the same classes and CSS
/// - Condition nesting order never reaches the class name
/// - Compiling twice with a warm cache matches a cold compile
use indexmap::IndexMap;
use proptest::prelude::*;
use stylekit_compiler::{create, CompileOptions, CompileOutput, Namespaces, StyleCompiler, StyleTree};

const PROPERTIES: &[&str] = &[
    "color",
    "backgroundColor",
    "width",
    "height",
    "opacity",
    "marginTop",
    "paddingInlineStart",
    "zIndex",
];

const CONDITIONS: &[&str] = &[
    ":hover",
    ":focus",
    ":active",
    "@media (min-width: 800px)",
    "@supports (display: grid)",
];

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("red".to_string()),
        Just("blue".to_string()),
        (0u32..64).prop_map(|n| format!("{}px", n)),
        (0u32..10).prop_map(|n| format!("{}", n)),
        Just("calc(100% - 4px)".to_string()),
    ]
}

fn declarations() -> impl Strategy<Value = Vec<(String, String, Option<String>)>> {
    prop::collection::vec(
        (
            prop::sample::select(PROPERTIES),
            value_strategy(),
            prop::option::of(prop::sample::select(CONDITIONS)),
        )
            .prop_map(|(property, value, condition)| {
                (property.to_string(), value, condition.map(str::to_string))
            }),
        1..8,
    )
}

fn build(declarations: &[(String, String, Option<String>)]) -> StyleTree {
    let mut by_property: IndexMap<String, StyleTree> = IndexMap::new();
    let mut tree = StyleTree::new();
    for (property, value, condition) in declarations {
        match condition {
            Some(condition) => {
                by_property
                    .entry(property.clone())
                    .or_default()
                    .insert(condition.clone(), value.as_str());
            }
            None => {
                by_property
                    .entry(property.clone())
                    .or_default()
                    .insert("default".to_string(), value.as_str());
            }
        }
    }
    for (property, conditions) in by_property {
        tree.insert(property, conditions);
    }
    tree
}

fn compile(tree: StyleTree) -> CompileOutput {
    let mut namespaces = Namespaces::new();
    namespaces.insert("root".to_string(), tree);
    create(&namespaces, &CompileOptions::default()).expect("compile failed")
}

fn sorted_rules(output: &CompileOutput) -> Vec<(String, String)> {
    let mut rules: Vec<(String, String)> = output
        .injected
        .iter()
        .map(|(class_name, style)| (class_name.clone(), style.ltr.clone()))
        .collect();
    rules.sort();
    rules
}

proptest! {
    #[test]
    fn prop_reversed_authoring_order_is_equivalent(decls in declarations()) {
        let forward = build(&decls);
        // Later duplicates win, so keep the same winner after reversing
        let mut seen = std::collections::HashSet::new();
        let deduped: Vec<_> = decls
            .iter()
            .rev()
            .filter(|(property, _, condition)| seen.insert((property.clone(), condition.clone())))
            .cloned()
            .collect();
        let backward = build(&deduped);

        prop_assert_eq!(sorted_rules(&compile(forward)), sorted_rules(&compile(backward)));
    }

    #[test]
    fn prop_condition_nesting_order_is_irrelevant(
        property in prop::sample::select(PROPERTIES),
        value in value_strategy(),
        outer in prop::sample::select(CONDITIONS),
        inner in prop::sample::select(CONDITIONS),
    ) {
        prop_assume!(outer != inner);
        let nested = |a: &str, b: &str| {
            StyleTree::new().with(
                property,
                StyleTree::new().with(a, StyleTree::new().with(b, value.as_str())),
            )
        };

        let one = compile(nested(outer, inner));
        let two = compile(nested(inner, outer));
        prop_assert_eq!(sorted_rules(&one), sorted_rules(&two));
    }

    #[test]
    fn prop_warm_cache_matches_cold_compile(decls in declarations()) {
        let tree = build(&decls);
        let mut namespaces = Namespaces::new();
        namespaces.insert("root".to_string(), tree);

        let mut compiler = StyleCompiler::default();
        let first = compiler.create(&namespaces).expect("compile failed");
        let second = compiler.create(&namespaces).expect("compile failed");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &create(&namespaces, &CompileOptions::default()).expect("compile failed"));
    }
}
