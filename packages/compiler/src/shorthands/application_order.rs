use super::{with_nulls, Expansion, ShorthandStrategy};
use crate::error::CompileResult;
use crate::tree::Scalar;

/// Keeps shorthands intact and unsets every longhand they reset
///
/// Later longhands then override the shorthand purely through application
/// order, which the runtime guarantees with priority groups.
pub struct ApplicationOrder;

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

/// Longhands (and nested shorthands) reset by each shorthand
fn constituents(property: &str) -> Option<&'static [&'static str]> {
    let reset: &'static [&'static str] = match property {
        "margin" => &[
            "marginTop",
            "marginRight",
            "marginBottom",
            "marginLeft",
            "marginInline",
            "marginInlineStart",
            "marginInlineEnd",
            "marginBlock",
            "marginBlockStart",
            "marginBlockEnd",
        ],
        "marginInline" => &["marginInlineStart", "marginInlineEnd", "marginLeft", "marginRight"],
        "marginBlock" => &["marginBlockStart", "marginBlockEnd", "marginTop", "marginBottom"],
        "padding" => &[
            "paddingTop",
            "paddingRight",
            "paddingBottom",
            "paddingLeft",
            "paddingInline",
            "paddingInlineStart",
            "paddingInlineEnd",
            "paddingBlock",
            "paddingBlockStart",
            "paddingBlockEnd",
        ],
        "paddingInline" => &["paddingInlineStart", "paddingInlineEnd", "paddingLeft", "paddingRight"],
        "paddingBlock" => &["paddingBlockStart", "paddingBlockEnd", "paddingTop", "paddingBottom"],
        "inset" => &[
            "top",
            "right",
            "bottom",
            "left",
            "insetInline",
            "insetInlineStart",
            "insetInlineEnd",
            "insetBlock",
            "insetBlockStart",
            "insetBlockEnd",
        ],
        "insetInline" => &["insetInlineStart", "insetInlineEnd", "left", "right"],
        "insetBlock" => &["insetBlockStart", "insetBlockEnd", "top", "bottom"],
        "border" => &[
            "borderTop",
            "borderRight",
            "borderBottom",
            "borderLeft",
            "borderInline",
            "borderInlineStart",
            "borderInlineEnd",
            "borderBlock",
            "borderBlockStart",
            "borderBlockEnd",
            "borderColor",
            "borderStyle",
            "borderWidth",
        ],
        "borderInline" => &["borderInlineStart", "borderInlineEnd", "borderLeft", "borderRight"],
        "borderBlock" => &["borderBlockStart", "borderBlockEnd", "borderTop", "borderBottom"],
        "borderColor" => &[
            "borderTopColor",
            "borderRightColor",
            "borderBottomColor",
            "borderLeftColor",
            "borderInlineColor",
            "borderInlineStartColor",
            "borderInlineEndColor",
            "borderBlockColor",
            "borderBlockStartColor",
            "borderBlockEndColor",
        ],
        "borderStyle" => &[
            "borderTopStyle",
            "borderRightStyle",
            "borderBottomStyle",
            "borderLeftStyle",
            "borderInlineStyle",
            "borderInlineStartStyle",
            "borderInlineEndStyle",
            "borderBlockStyle",
            "borderBlockStartStyle",
            "borderBlockEndStyle",
        ],
        "borderWidth" => &[
            "borderTopWidth",
            "borderRightWidth",
            "borderBottomWidth",
            "borderLeftWidth",
            "borderInlineWidth",
            "borderInlineStartWidth",
            "borderInlineEndWidth",
            "borderBlockWidth",
            "borderBlockStartWidth",
            "borderBlockEndWidth",
        ],
        "borderRadius" => &[
            "borderTopLeftRadius",
            "borderTopRightRadius",
            "borderBottomRightRadius",
            "borderBottomLeftRadius",
            "borderStartStartRadius",
            "borderStartEndRadius",
            "borderEndEndRadius",
            "borderEndStartRadius",
        ],
        "gap" => &["rowGap", "columnGap"],
        "overflow" => &["overflowX", "overflowY"],
        "listStyle" => &["listStyleType", "listStylePosition", "listStyleImage"],
        "containIntrinsicSize" => &["containIntrinsicWidth", "containIntrinsicHeight"],
        "background" => &[
            "backgroundAttachment",
            "backgroundClip",
            "backgroundColor",
            "backgroundImage",
            "backgroundOrigin",
            "backgroundPosition",
            "backgroundPositionX",
            "backgroundPositionY",
            "backgroundRepeat",
            "backgroundSize",
        ],
        "font" => &[
            "fontFamily",
            "fontSize",
            "fontStretch",
            "fontStyle",
            "fontVariant",
            "fontWeight",
            "lineHeight",
        ],
        "flex" => &["flexGrow", "flexShrink", "flexBasis"],
        "flexFlow" => &["flexDirection", "flexWrap"],
        "outline" => &["outlineColor", "outlineStyle", "outlineWidth"],
        "textDecoration" => &["textDecorationColor", "textDecorationLine", "textDecorationStyle", "textDecorationThickness"],
        "transition" => &[
            "transitionBehavior",
            "transitionDelay",
            "transitionDuration",
            "transitionProperty",
            "transitionTimingFunction",
        ],
        "animation" => &[
            "animationComposition",
            "animationDelay",
            "animationDirection",
            "animationDuration",
            "animationFillMode",
            "animationIterationCount",
            "animationName",
            "animationPlayState",
            "animationTimeline",
            "animationTimingFunction",
        ],
        "placeContent" => &["alignContent", "justifyContent"],
        "placeItems" => &["alignItems", "justifyItems"],
        "placeSelf" => &["alignSelf", "justifySelf"],
        "columns" => &["columnCount", "columnWidth"],
        "gridArea" => &["gridRowStart", "gridColumnStart", "gridRowEnd", "gridColumnEnd"],
        "gridRow" => &["gridRowStart", "gridRowEnd"],
        "gridColumn" => &["gridColumnStart", "gridColumnEnd"],
        _ => return None,
    };
    Some(reset)
}

/// Logical and physical inline sides that must not coexist
const INLINE_SIDES: &[([&str; 2], [&str; 2])] = &[
    (["marginInlineStart", "marginInlineEnd"], ["marginLeft", "marginRight"]),
    (["paddingInlineStart", "paddingInlineEnd"], ["paddingLeft", "paddingRight"]),
    (["insetInlineStart", "insetInlineEnd"], ["left", "right"]),
    (["borderInlineStart", "borderInlineEnd"], ["borderLeft", "borderRight"]),
    (
        ["borderStartStartRadius", "borderStartEndRadius"],
        ["borderTopLeftRadius", "borderTopRightRadius"],
    ),
    (
        ["borderEndStartRadius", "borderEndEndRadius"],
        ["borderBottomLeftRadius", "borderBottomRightRadius"],
    ),
];

impl ShorthandStrategy for ApplicationOrder {
    fn name(&self) -> &'static str {
        "application-order"
    }

    fn expand(&self, property: &str, value: Option<&Scalar>) -> CompileResult<Expansion> {
        if let Some(target) = alias(property) {
            return self.expand(target, value);
        }

        if let Some(reset) = constituents(property) {
            return Ok(with_nulls(property, value, reset));
        }

        let exclusive = INLINE_SIDES.iter().find_map(|(logical, physical)| {
            if logical.contains(&property) {
                Some(with_nulls(property, value, physical))
            } else if physical.contains(&property) {
                Some(with_nulls(property, value, logical))
            } else {
                None
            }
        });

        Ok(exclusive.unwrap_or_else(|| vec![(property.to_string(), value.cloned())]))
    }
}
