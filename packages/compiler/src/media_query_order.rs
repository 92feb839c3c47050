//! Media query ordering pre-pass
//!
//! When one map holds several `@media` keys, each key is narrowed by
//! negating every later sibling so that the last matching query wins no
//! matter how the generated rules end up ordered.
//!
//! ```text
//! "@media (min-width: 800px)"  -> "@media (min-width: 800px) and (not (min-width: 1200px))"
//! "@media (min-width: 1200px)" -> "@media (min-width: 1200px)"
//! ```

use crate::error::{CompileError, CompileResult};
use crate::options::CompileOptions;
use crate::tree::{StyleTree, StyleValue};
use crate::value_parser::{contains_top_level, has_unclosed_function, ValueToken};
use tracing::warn;

const MEDIA_PREFIX: &str = "@media";

/// Apply the pre-pass to a whole style tree, honouring `softMediaQueryValidation`
pub fn order_media_queries(tree: &StyleTree, options: &CompileOptions) -> CompileResult<StyleTree> {
    match order_tree(tree) {
        Ok(ordered) => Ok(ordered),
        Err(error) if options.soft_media_query_validation => {
            warn!(%error, "media queries left unordered");
            Ok(tree.clone())
        }
        Err(error) => Err(error),
    }
}

fn order_tree(tree: &StyleTree) -> CompileResult<StyleTree> {
    let queries: Vec<&str> = tree
        .keys()
        .filter_map(|key| media_condition(key))
        .collect();

    let mut rewritten = Vec::with_capacity(queries.len());
    if queries.len() > 1 {
        for query in &queries {
            validate_condition(query)?;
        }
        for (index, query) in queries.iter().enumerate() {
            rewritten.push(combine(query, &queries[index + 1..]));
        }
    }

    let mut media_index = 0;
    tree.iter()
        .map(|(key, value)| {
            let value = match value {
                StyleValue::Conditional(inner) => StyleValue::Conditional(order_tree(inner)?),
                other => other.clone(),
            };

            let key = match media_condition(key).and(rewritten.get(media_index)) {
                Some(ordered) => {
                    media_index += 1;
                    ordered.clone()
                }
                None => key.clone(),
            };
            Ok::<_, CompileError>((key, value))
        })
        .collect()
}

fn media_condition(key: &str) -> Option<&str> {
    key.strip_prefix(MEDIA_PREFIX)
        .filter(|rest| rest.starts_with(' ') || rest.starts_with('('))
        .map(str::trim)
}

fn validate_condition(query: &str) -> CompileResult<()> {
    let starts_with_condition = query.starts_with('(')
        || query
            .strip_prefix("not")
            .is_some_and(|rest| rest.trim_start().starts_with('('));
    if !starts_with_condition {
        return Err(CompileError::invalid_media_query(
            query,
            "expected a media condition such as '(min-width: 800px)'",
        ));
    }

    let opens = query.matches('(').count();
    let closes = query.matches(')').count();
    if opens != closes || has_unclosed_function(query) {
        return Err(CompileError::invalid_media_query(query, "unbalanced parentheses"));
    }

    if contains_top_level(query, ValueToken::Comma) {
        return Err(CompileError::invalid_media_query(
            query,
            "comma separated media query lists cannot be ordered",
        ));
    }

    Ok(())
}

/// Conditions joined with `and` must not start with `not` or contain `or`
fn as_conjunct(query: &str) -> String {
    if query.starts_with("not") || query.contains(" or ") {
        format!("({})", query)
    } else {
        query.to_string()
    }
}

fn combine(query: &str, later: &[&str]) -> String {
    let mut combined = format!("{} {}", MEDIA_PREFIX, as_conjunct(query));
    for other in later {
        combined.push_str(&format!(" and (not {})", as_conjunct(other)));
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tree: &StyleTree) -> Vec<String> {
        tree.keys().cloned().collect()
    }

    #[test]
    fn test_later_queries_win() {
        let tree = StyleTree::new().with(
            "width",
            StyleTree::new()
                .with("default", "100%")
                .with("@media (min-width: 800px)", "800px")
                .with("@media (min-width: 1200px)", "1200px"),
        );

        let ordered = order_media_queries(&tree, &CompileOptions::default()).unwrap();
        let Some(StyleValue::Conditional(width)) = ordered.get("width") else {
            panic!("expected a conditional value");
        };
        assert_eq!(
            keys(width),
            vec![
                "default",
                "@media (min-width: 800px) and (not (min-width: 1200px))",
                "@media (min-width: 1200px)",
            ]
        );
    }

    #[test]
    fn test_single_query_is_untouched() {
        let tree = StyleTree::new().with(
            "color",
            StyleTree::new().with("default", "red").with("@media print", "black"),
        );
        let ordered = order_media_queries(&tree, &CompileOptions::default()).unwrap();
        assert_eq!(ordered, tree);
    }

    #[test]
    fn test_not_and_or_are_parenthesised() {
        assert_eq!(
            combine("not (hover: hover)", &["(a) or (b)"]),
            "@media (not (hover: hover)) and (not ((a) or (b)))"
        );
    }

    #[test]
    fn test_invalid_query_errors() {
        let tree = StyleTree::new().with(
            "color",
            StyleTree::new()
                .with("@media screen", "red")
                .with("@media (min-width: 10px)", "blue"),
        );
        assert!(matches!(
            order_media_queries(&tree, &CompileOptions::default()),
            Err(CompileError::InvalidMediaQuery { .. })
        ));
    }

    #[test]
    fn test_soft_validation_keeps_tree() {
        let tree = StyleTree::new().with(
            "color",
            StyleTree::new()
                .with("@media (min-width: 10px), print", "red")
                .with("@media (min-width: 20px)", "blue"),
        );
        let options = CompileOptions {
            soft_media_query_validation: true,
            ..Default::default()
        };
        assert_eq!(order_media_queries(&tree, &options).unwrap(), tree);
    }
}
