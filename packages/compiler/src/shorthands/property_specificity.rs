use super::{
    assign, box_sides, contain_intrinsic_size, list_style, pair, single, with_nulls, Expansion,
    ShorthandStrategy,
};
use crate::error::CompileResult;
use crate::tree::Scalar;

/// Expands shorthands into standard CSS logical longhands
///
/// Every expansion also unsets the physical longhands it supersedes, so a
/// later authored physical override still resolves deterministically.
pub struct PropertySpecificity;

fn alias(property: &str) -> Option<&'static str> {
    let target = match property {
        "marginStart" => "marginInlineStart",
        "marginEnd" => "marginInlineEnd",
        "marginHorizontal" => "marginInline",
        "marginVertical" => "marginBlock",
        "paddingStart" => "paddingInlineStart",
        "paddingEnd" => "paddingInlineEnd",
        "paddingHorizontal" => "paddingInline",
        "paddingVertical" => "paddingBlock",
        "start" => "insetInlineStart",
        "end" => "insetInlineEnd",
        "borderStart" => "borderInlineStart",
        "borderEnd" => "borderInlineEnd",
        "borderStartColor" => "borderInlineStartColor",
        "borderStartStyle" => "borderInlineStartStyle",
        "borderStartWidth" => "borderInlineStartWidth",
        "borderEndColor" => "borderInlineEndColor",
        "borderEndStyle" => "borderInlineEndStyle",
        "borderEndWidth" => "borderInlineEndWidth",
        "borderHorizontal" => "borderInline",
        "borderVertical" => "borderBlock",
        "borderTopStartRadius" => "borderStartStartRadius",
        "borderTopEndRadius" => "borderStartEndRadius",
        "borderBottomStartRadius" => "borderEndStartRadius",
        "borderBottomEndRadius" => "borderEndEndRadius",
        "gridGap" => "gap",
        "gridRowGap" => "rowGap",
        "gridColumnGap" => "columnGap",
        _ => return None,
    };
    Some(target)
}

/// Logical/physical pairs for one inline side. Setting either side of a
/// pair unsets the other family.
const INLINE_SIDES: &[([&str; 2], [&str; 2])] = &[
    (["marginInlineStart", "marginInlineEnd"], ["marginLeft", "marginRight"]),
    (["paddingInlineStart", "paddingInlineEnd"], ["paddingLeft", "paddingRight"]),
    (["insetInlineStart", "insetInlineEnd"], ["left", "right"]),
    (["borderInlineStart", "borderInlineEnd"], ["borderLeft", "borderRight"]),
    (
        ["borderInlineStartColor", "borderInlineEndColor"],
        ["borderLeftColor", "borderRightColor"],
    ),
    (
        ["borderInlineStartStyle", "borderInlineEndStyle"],
        ["borderLeftStyle", "borderRightStyle"],
    ),
    (
        ["borderInlineStartWidth", "borderInlineEndWidth"],
        ["borderLeftWidth", "borderRightWidth"],
    ),
    (
        ["borderStartStartRadius", "borderStartEndRadius"],
        ["borderTopLeftRadius", "borderTopRightRadius"],
    ),
    (
        ["borderEndStartRadius", "borderEndEndRadius"],
        ["borderBottomLeftRadius", "borderBottomRightRadius"],
    ),
];

fn inline_side(property: &str, value: Option<&Scalar>) -> Option<Expansion> {
    INLINE_SIDES.iter().find_map(|(logical, physical)| {
        if logical.contains(&property) {
            Some(with_nulls(property, value, physical))
        } else if physical.contains(&property) {
            Some(with_nulls(property, value, logical))
        } else {
            None
        }
    })
}

impl PropertySpecificity {
    /// Four box sides as `[top, inline-end, bottom, inline-start]`
    fn box_longhands(
        &self,
        property: &str,
        value: Option<&Scalar>,
        names: [&str; 4],
    ) -> CompileResult<Expansion> {
        let [top, end, bottom, start] = box_sides(property, value)?;
        let mut expansion = single(names[0], top.as_ref());
        expansion.extend(self.expand(names[1], end.as_ref())?);
        expansion.extend(single(names[2], bottom.as_ref()));
        expansion.extend(self.expand(names[3], start.as_ref())?);
        Ok(expansion)
    }

    fn pair_longhands(&self, property: &str, value: Option<&Scalar>, names: [&str; 2]) -> CompileResult<Expansion> {
        let [first, second] = pair(property, value)?;
        let mut expansion = self.expand(names[0], first.as_ref())?;
        expansion.extend(self.expand(names[1], second.as_ref())?);
        Ok(expansion)
    }
}

impl ShorthandStrategy for PropertySpecificity {
    fn name(&self) -> &'static str {
        "property-specificity"
    }

    fn expand(&self, property: &str, value: Option<&Scalar>) -> CompileResult<Expansion> {
        if let Some(target) = alias(property) {
            return self.expand(target, value);
        }
        if let Some(expansion) = inline_side(property, value) {
            return Ok(expansion);
        }

        match property {
            "margin" => self.box_longhands(
                property,
                value,
                ["marginTop", "marginInlineEnd", "marginBottom", "marginInlineStart"],
            ),
            "padding" => self.box_longhands(
                property,
                value,
                ["paddingTop", "paddingInlineEnd", "paddingBottom", "paddingInlineStart"],
            ),
            "inset" => self.box_longhands(
                property,
                value,
                ["top", "insetInlineEnd", "bottom", "insetInlineStart"],
            ),
            "borderColor" | "borderStyle" | "borderWidth" => {
                let suffix = &property["border".len()..];
                let top = format!("borderTop{}", suffix);
                let end = format!("borderInlineEnd{}", suffix);
                let bottom = format!("borderBottom{}", suffix);
                let start = format!("borderInlineStart{}", suffix);
                self.box_longhands(
                    property,
                    value,
                    [top.as_str(), end.as_str(), bottom.as_str(), start.as_str()],
                )
            }
            "border" => Ok(assign(
                &["borderTop", "borderInlineEnd", "borderBottom", "borderInlineStart", "borderLeft", "borderRight"],
                &[value.cloned(), value.cloned(), value.cloned(), value.cloned(), None, None],
            )),
            "borderRadius" => {
                let [start_start, start_end, end_end, end_start] = box_sides(property, value)?;
                let mut expansion = self.expand("borderStartStartRadius", start_start.as_ref())?;
                expansion.extend(self.expand("borderStartEndRadius", start_end.as_ref())?);
                expansion.extend(self.expand("borderEndEndRadius", end_end.as_ref())?);
                expansion.extend(self.expand("borderEndStartRadius", end_start.as_ref())?);
                Ok(expansion)
            }

            "marginInline" => self.pair_longhands(property, value, ["marginInlineStart", "marginInlineEnd"]),
            "paddingInline" => self.pair_longhands(property, value, ["paddingInlineStart", "paddingInlineEnd"]),
            "insetInline" => self.pair_longhands(property, value, ["insetInlineStart", "insetInlineEnd"]),
            "marginBlock" => self.pair_longhands(property, value, ["marginTop", "marginBottom"]),
            "paddingBlock" => self.pair_longhands(property, value, ["paddingTop", "paddingBottom"]),
            "insetBlock" => self.pair_longhands(property, value, ["top", "bottom"]),
            "gap" => self.pair_longhands(property, value, ["rowGap", "columnGap"]),
            "overflow" => self.pair_longhands(property, value, ["overflowX", "overflowY"]),

            "containIntrinsicSize" => contain_intrinsic_size(value),
            "listStyle" => list_style(value),

            _ => Ok(single(property, value)),
        }
    }
}
