//! Shorthand expansion strategies
//!
//! Each `StyleResolution` mode has its own table. The flattener only sees the
//! `ShorthandStrategy` trait and the shared pre-checks in `expand`.

mod application_order;
mod legacy;
mod property_specificity;

pub use application_order::ApplicationOrder;
pub use legacy::LegacyExpandShorthands;
pub use property_specificity::PropertySpecificity;

use crate::error::{CompileError, CompileResult};
use crate::options::StyleResolution;
use crate::tree::Scalar;
use crate::value_parser::{
    contains_top_level, single_token, split_whitespace, ValueToken,
};

/// Longhand pairs produced by one authored property. `None` unsets the longhand.
pub type Expansion = Vec<(String, Option<Scalar>)>;

/// Properties that can never be decomposed
const BANNED_PROPERTIES: &[&str] = &["all"];

const GLOBAL_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert", "revert-layer"];

pub const LOGICAL_FLOAT_START: &str = "var(--logical-float-start)";
pub const LOGICAL_FLOAT_END: &str = "var(--logical-float-end)";

/// Trait for a shorthand resolution table
pub trait ShorthandStrategy: Send + Sync {
    /// Identifier of the `styleResolution` mode
    fn name(&self) -> &'static str;

    /// Expand one property. Properties without an entry pass through unchanged.
    fn expand(&self, property: &str, value: Option<&Scalar>) -> CompileResult<Expansion>;
}

/// Strategy for a resolution mode
pub fn strategy_for(resolution: StyleResolution) -> Box<dyn ShorthandStrategy> {
    match resolution {
        StyleResolution::ApplicationOrder => Box::new(ApplicationOrder),
        StyleResolution::PropertySpecificity => Box::new(PropertySpecificity),
        StyleResolution::LegacyExpandShorthands => Box::new(LegacyExpandShorthands),
    }
}

/// Checks shared by every strategy, then the strategy's own table
pub fn expand(
    strategy: &dyn ShorthandStrategy,
    property: &str,
    value: Option<&Scalar>,
) -> CompileResult<Expansion> {
    if BANNED_PROPERTIES.contains(&property) {
        return Err(CompileError::banned_property(property));
    }

    match value {
        Some(value) if property == "float" || property == "clear" => {
            let translated = logical_float_value(value);
            strategy.expand(property, Some(&translated))
        }
        _ => strategy.expand(property, value),
    }
}

fn logical_float_value(value: &Scalar) -> Scalar {
    match value.as_text().map(str::trim) {
        Some("start") | Some("inline-start") => Scalar::from(LOGICAL_FLOAT_START),
        Some("end") | Some("inline-end") => Scalar::from(LOGICAL_FLOAT_END),
        _ => value.clone(),
    }
}

pub(crate) fn single(property: &str, value: Option<&Scalar>) -> Expansion {
    vec![(property.to_string(), value.cloned())]
}

/// The property itself, followed by unset markers for the longhands it replaces
pub(crate) fn with_nulls(property: &str, value: Option<&Scalar>, nulls: &[&str]) -> Expansion {
    let mut expansion = single(property, value);
    expansion.extend(nulls.iter().map(|null| (null.to_string(), None)));
    expansion
}

pub(crate) fn assign(names: &[&str], values: &[Option<Scalar>]) -> Expansion {
    names
        .iter()
        .zip(values.iter())
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Split a space separated shorthand value. `!important` moves onto every part.
pub(crate) fn split_value(property: &str, value: Option<&Scalar>) -> CompileResult<Vec<Option<Scalar>>> {
    let text = match value {
        None => return Ok(vec![None]),
        Some(Scalar::Number(_)) => return Ok(vec![value.cloned()]),
        Some(Scalar::Text(text)) => text,
    };

    if contains_top_level(text, ValueToken::Comma) {
        return Err(CompileError::invalid_shorthand(
            property,
            text.as_str(),
            "comma separated values cannot be decomposed",
        ));
    }

    let mut parts = split_whitespace(text);
    let important = parts
        .last()
        .is_some_and(|last| single_token(last) == Some(ValueToken::Important));
    if important {
        parts.pop();
    }

    if parts.is_empty() {
        return Err(CompileError::invalid_shorthand(property, text.as_str(), "empty value"));
    }

    Ok(parts
        .into_iter()
        .map(|part| {
            if important {
                Some(Scalar::Text(format!("{} !important", part)))
            } else {
                Some(Scalar::Text(part))
            }
        })
        .collect())
}

/// CSS 1-4 value rule: `[top, right = top, bottom = top, left = right]`
pub(crate) fn box_sides(property: &str, value: Option<&Scalar>) -> CompileResult<[Option<Scalar>; 4]> {
    if let Some(text) = value.and_then(Scalar::as_text) {
        if contains_top_level(text, ValueToken::Slash) {
            return Err(CompileError::invalid_shorthand(
                property,
                text,
                "values separated by '/' cannot be decomposed",
            ));
        }
    }

    let parts = split_value(property, value)?;
    match parts.as_slice() {
        [a] => Ok([a.clone(), a.clone(), a.clone(), a.clone()]),
        [a, b] => Ok([a.clone(), b.clone(), a.clone(), b.clone()]),
        [a, b, c] => Ok([a.clone(), b.clone(), c.clone(), b.clone()]),
        [a, b, c, d] => Ok([a.clone(), b.clone(), c.clone(), d.clone()]),
        _ => Err(CompileError::invalid_shorthand(
            property,
            value.map(|v| v.to_string()).unwrap_or_default(),
            "expected between one and four values",
        )),
    }
}

/// CSS 1-2 value rule: `[a, b = a]`
pub(crate) fn pair(property: &str, value: Option<&Scalar>) -> CompileResult<[Option<Scalar>; 2]> {
    let parts = split_value(property, value)?;
    match parts.as_slice() {
        [a] => Ok([a.clone(), a.clone()]),
        [a, b] => Ok([a.clone(), b.clone()]),
        _ => Err(CompileError::invalid_shorthand(
            property,
            value.map(|v| v.to_string()).unwrap_or_default(),
            "expected one or two values",
        )),
    }
}

/// `auto 300px 200px` → width `auto 300px`, height `200px`
pub(crate) fn contain_intrinsic_size(value: Option<&Scalar>) -> CompileResult<Expansion> {
    let parts = split_value("containIntrinsicSize", value)?;

    let mut merged: Vec<Option<Scalar>> = Vec::with_capacity(parts.len());
    for part in parts {
        let after_auto = matches!(
            merged.last(),
            Some(Some(Scalar::Text(last))) if last == "auto"
        );
        match (after_auto, part) {
            (true, Some(part)) => {
                if let Some(last) = merged.last_mut() {
                    *last = Some(Scalar::Text(format!("auto {}", part)));
                }
            }
            (_, part) => merged.push(part),
        }
    }

    let [width, height] = match merged.as_slice() {
        [a] => [a.clone(), a.clone()],
        [a, b] => [a.clone(), b.clone()],
        _ => {
            return Err(CompileError::invalid_shorthand(
                "containIntrinsicSize",
                value.map(|v| v.to_string()).unwrap_or_default(),
                "expected a width and an optional height",
            ))
        }
    };

    Ok(assign(
        &["containIntrinsicWidth", "containIntrinsicHeight"],
        &[width, height],
    ))
}

const LIST_STYLE_LONGHANDS: [&str; 3] = ["listStyleType", "listStylePosition", "listStyleImage"];
const LIST_STYLE_POSITIONS: &[&str] = &["inside", "outside"];

fn is_image(part: &str) -> bool {
    let lower = part.to_ascii_lowercase();
    lower.starts_with("url(")
        || lower.starts_with("image(")
        || lower.starts_with("image-set(")
        || lower.starts_with("cross-fade(")
        || lower.contains("gradient(")
}

/// Decompose `listStyle` into type, position and image
pub(crate) fn list_style(value: Option<&Scalar>) -> CompileResult<Expansion> {
    let text = match value {
        None => return Ok(assign(&LIST_STYLE_LONGHANDS, &[None, None, None])),
        Some(Scalar::Number(number)) => {
            return Err(CompileError::invalid_shorthand(
                "listStyle",
                number.to_string(),
                "a number is not a list style",
            ))
        }
        Some(Scalar::Text(text)) => text.trim(),
    };
    let invalid = |reason: &str| CompileError::invalid_shorthand("listStyle", text, reason);

    if GLOBAL_KEYWORDS.contains(&text) {
        let keyword = Some(Scalar::from(text));
        return Ok(assign(
            &LIST_STYLE_LONGHANDS,
            &[keyword.clone(), keyword.clone(), keyword],
        ));
    }
    if text.contains("var(") {
        return Err(invalid("variables cannot be decomposed"));
    }

    let parts = split_whitespace(text);
    if parts.iter().any(|part| GLOBAL_KEYWORDS.contains(&part.as_str())) {
        return Err(invalid("global keywords cannot be combined with other values"));
    }

    let mut list_type: Option<String> = None;
    let mut position: Option<String> = None;
    let mut image: Option<String> = None;
    let mut remaining = Vec::new();

    // Unambiguous tokens first
    for part in parts {
        if LIST_STYLE_POSITIONS.contains(&part.as_str()) {
            if position.is_some() {
                return Err(invalid("more than one position"));
            }
            position = Some(part);
        } else if part != "none"
            && matches!(
                single_token(&part),
                Some(ValueToken::Ident) | Some(ValueToken::String)
            )
        {
            if list_type.is_some() {
                return Err(invalid("more than one list style type"));
            }
            list_type = Some(part);
        } else {
            remaining.push(part);
        }
    }

    for part in remaining {
        if part == "none" {
            if list_type.is_some() {
                return Err(invalid("'none' conflicts with the list style type"));
            }
            list_type = Some(part);
        } else if is_image(&part) {
            if image.is_some() {
                return Err(invalid("more than one image"));
            }
            image = Some(part);
        } else if list_type.is_none() {
            list_type = Some(part);
        } else if image.is_none() {
            image = Some(part);
        } else {
            return Err(invalid("value is ambiguous"));
        }
    }

    Ok(assign(
        &LIST_STYLE_LONGHANDS,
        &[
            list_type.map(Scalar::Text),
            position.map(Scalar::Text),
            image.map(Scalar::Text),
        ],
    ))
}
