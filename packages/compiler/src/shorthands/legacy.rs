use super::{
    assign, box_sides, contain_intrinsic_size, list_style, pair, single, with_nulls, Expansion,
    ShorthandStrategy,
};
use crate::error::CompileResult;
use crate::tree::Scalar;

/// Expands shorthands into the legacy `start`/`end` longhands
///
/// Standard logical names are aliased onto the legacy ones, and the rule
/// generator translates those into physical properties per direction.
pub struct LegacyExpandShorthands;

fn alias(property: &str) -> Option<&'static str> {
    let target = match property {
        "insetBlockStart" => "top",
        "insetBlockEnd" => "bottom",
        "insetInlineStart" => "start",
        "insetInlineEnd" => "end",

        "blockSize" => "height",
        "inlineSize" => "width",
        "minBlockSize" => "minHeight",
        "minInlineSize" => "minWidth",
        "maxBlockSize" => "maxHeight",
        "maxInlineSize" => "maxWidth",

        "marginBlock" => "marginVertical",
        "marginBlockStart" => "marginTop",
        "marginBlockEnd" => "marginBottom",
        "marginInline" => "marginHorizontal",
        "marginInlineStart" => "marginStart",
        "marginInlineEnd" => "marginEnd",

        "paddingBlock" => "paddingVertical",
        "paddingBlockStart" => "paddingTop",
        "paddingBlockEnd" => "paddingBottom",
        "paddingInline" => "paddingHorizontal",
        "paddingInlineStart" => "paddingStart",
        "paddingInlineEnd" => "paddingEnd",

        "borderBlock" => "borderVertical",
        "borderBlockColor" => "borderVerticalColor",
        "borderBlockStyle" => "borderVerticalStyle",
        "borderBlockWidth" => "borderVerticalWidth",
        "borderBlockStart" => "borderTop",
        "borderBlockStartColor" => "borderTopColor",
        "borderBlockStartStyle" => "borderTopStyle",
        "borderBlockStartWidth" => "borderTopWidth",
        "borderBlockEnd" => "borderBottom",
        "borderBlockEndColor" => "borderBottomColor",
        "borderBlockEndStyle" => "borderBottomStyle",
        "borderBlockEndWidth" => "borderBottomWidth",
        "borderInline" => "borderHorizontal",
        "borderInlineColor" => "borderHorizontalColor",
        "borderInlineStyle" => "borderHorizontalStyle",
        "borderInlineWidth" => "borderHorizontalWidth",
        "borderInlineStart" => "borderStart",
        "borderInlineStartColor" => "borderStartColor",
        "borderInlineStartStyle" => "borderStartStyle",
        "borderInlineStartWidth" => "borderStartWidth",
        "borderInlineEnd" => "borderEnd",
        "borderInlineEndColor" => "borderEndColor",
        "borderInlineEndStyle" => "borderEndStyle",
        "borderInlineEndWidth" => "borderEndWidth",

        "borderStartStartRadius" => "borderTopStartRadius",
        "borderStartEndRadius" => "borderTopEndRadius",
        "borderEndStartRadius" => "borderBottomStartRadius",
        "borderEndEndRadius" => "borderBottomEndRadius",

        "gridGap" => "gap",
        "gridRowGap" => "rowGap",
        "gridColumnGap" => "columnGap",
        _ => return None,
    };
    Some(target)
}

/// Physical and logical names for one side that must not coexist
fn exclusive(property: &str, value: Option<&Scalar>, logical: [&str; 2], physical: [&str; 2]) -> Expansion {
    if logical.contains(&property) {
        with_nulls(property, value, &physical)
    } else {
        with_nulls(property, value, &logical)
    }
}

impl LegacyExpandShorthands {
    fn expand_side_pair(&self, start: &str, end: &str, value: Option<&Scalar>, property: &str) -> CompileResult<Expansion> {
        let [a, b] = pair(property, value)?;
        let mut expansion = self.expand(start, a.as_ref())?;
        expansion.extend(self.expand(end, b.as_ref())?);
        Ok(expansion)
    }
}

impl ShorthandStrategy for LegacyExpandShorthands {
    fn name(&self) -> &'static str {
        "legacy-expand-shorthands"
    }

    fn expand(&self, property: &str, value: Option<&Scalar>) -> CompileResult<Expansion> {
        if let Some(target) = alias(property) {
            return self.expand(target, value);
        }

        match property {
            "border" => Ok(assign(
                &["borderTop", "borderEnd", "borderBottom", "borderStart"],
                &[value.cloned(), value.cloned(), value.cloned(), value.cloned()],
            )),
            "borderColor" | "borderStyle" | "borderWidth" => {
                let suffix = &property["border".len()..];
                let names = ["Top", "End", "Bottom", "Start"].map(|side| format!("border{}{}", side, suffix));
                let sides = box_sides(property, value)?;
                Ok(names.into_iter().zip(sides).collect())
            }
            "borderHorizontal" | "borderHorizontalColor" | "borderHorizontalStyle"
            | "borderHorizontalWidth" => {
                let suffix = &property["borderHorizontal".len()..];
                let [start, end] = pair(property, value)?;
                Ok(vec![
                    (format!("borderStart{}", suffix), start),
                    (format!("borderEnd{}", suffix), end),
                ])
            }
            "borderVertical" | "borderVerticalColor" | "borderVerticalStyle"
            | "borderVerticalWidth" => {
                let suffix = &property["borderVertical".len()..];
                let [top, bottom] = pair(property, value)?;
                Ok(vec![
                    (format!("borderTop{}", suffix), top),
                    (format!("borderBottom{}", suffix), bottom),
                ])
            }
            "borderRadius" => Ok(assign(
                &[
                    "borderTopStartRadius",
                    "borderTopEndRadius",
                    "borderBottomEndRadius",
                    "borderBottomStartRadius",
                ],
                &box_sides(property, value)?,
            )),
            "borderTopStartRadius" | "borderTopLeftRadius" => Ok(exclusive(
                property,
                value,
                ["borderTopStartRadius", "borderTopEndRadius"],
                ["borderTopLeftRadius", "borderTopRightRadius"],
            )),
            "borderTopEndRadius" | "borderTopRightRadius" => Ok(exclusive(
                property,
                value,
                ["borderTopEndRadius", "borderTopStartRadius"],
                ["borderTopRightRadius", "borderTopLeftRadius"],
            )),
            "borderBottomStartRadius" | "borderBottomLeftRadius" => Ok(exclusive(
                property,
                value,
                ["borderBottomStartRadius", "borderBottomEndRadius"],
                ["borderBottomLeftRadius", "borderBottomRightRadius"],
            )),
            "borderBottomEndRadius" | "borderBottomRightRadius" => Ok(exclusive(
                property,
                value,
                ["borderBottomEndRadius", "borderBottomStartRadius"],
                ["borderBottomRightRadius", "borderBottomLeftRadius"],
            )),

            "containIntrinsicSize" => contain_intrinsic_size(value),
            "listStyle" => list_style(value),

            "inset" => Ok(assign(&["top", "end", "bottom", "start"], &box_sides(property, value)?)),
            "insetInline" => self.expand_side_pair("start", "end", value, property),
            "insetBlock" => {
                let [top, bottom] = pair(property, value)?;
                Ok(assign(&["top", "bottom"], &[top, bottom]))
            }
            "start" | "end" | "left" | "right" => {
                Ok(exclusive(property, value, ["start", "end"], ["left", "right"]))
            }

            "gap" => {
                let [row, column] = pair(property, value)?;
                Ok(assign(&["rowGap", "columnGap"], &[row, column]))
            }
            "overflow" => {
                let [x, y] = pair(property, value)?;
                Ok(assign(&["overflowX", "overflowY"], &[x, y]))
            }

            "margin" | "padding" => {
                let names = ["Top", "End", "Bottom", "Start"].map(|side| format!("{}{}", property, side));
                let sides = box_sides(property, value)?;
                Ok(names.into_iter().zip(sides).collect())
            }
            "marginHorizontal" => self.expand_side_pair("marginStart", "marginEnd", value, property),
            "paddingHorizontal" => self.expand_side_pair("paddingStart", "paddingEnd", value, property),
            "marginVertical" | "paddingVertical" => {
                let base = &property[..property.len() - "Vertical".len()];
                let [top, bottom] = pair(property, value)?;
                Ok(vec![
                    (format!("{}Top", base), top),
                    (format!("{}Bottom", base), bottom),
                ])
            }
            "marginStart" | "marginEnd" | "marginLeft" | "marginRight" => Ok(exclusive(
                property,
                value,
                ["marginStart", "marginEnd"],
                ["marginLeft", "marginRight"],
            )),
            "paddingStart" | "paddingEnd" | "paddingLeft" | "paddingRight" => Ok(exclusive(
                property,
                value,
                ["paddingStart", "paddingEnd"],
                ["paddingLeft", "paddingRight"],
            )),

            _ => Ok(single(property, value)),
        }
    }
}
