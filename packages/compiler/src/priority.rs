//! Cascade priorities
//!
//! A rule's priority is the weight of its property category plus the weight
//! of every condition it sits under. The runtime turns `priority / 1000`
//! into a specificity bump and uses the priority itself as the group key.

pub const CUSTOM_PROPERTY: f64 = 1.0;
pub const SHORTHAND_OF_SHORTHANDS: f64 = 1000.0;
pub const SHORTHAND_OF_LONGHANDS: f64 = 2000.0;
pub const LOGICAL_LONGHAND: f64 = 3000.0;
pub const PHYSICAL_LONGHAND: f64 = 4000.0;

pub const PSEUDO_ELEMENT: f64 = 5000.0;
pub const DEFAULT_PSEUDO_CLASS: f64 = 40.0;
pub const SUPPORTS: f64 = 30.0;
pub const MEDIA: f64 = 200.0;
pub const CONTAINER: f64 = 300.0;
pub const CONSTANT_REFERENCE: f64 = 200.0;

const SHORTHANDS_OF_SHORTHANDS: &[&str] = &[
    "all",
    "animation",
    "background",
    "border",
    "border-block",
    "border-block-end",
    "border-block-start",
    "border-bottom",
    "border-color",
    "border-end",
    "border-horizontal",
    "border-image",
    "border-inline",
    "border-inline-end",
    "border-inline-start",
    "border-left",
    "border-radius",
    "border-right",
    "border-start",
    "border-style",
    "border-top",
    "border-vertical",
    "border-width",
    "column-rule",
    "columns",
    "container",
    "flex",
    "flex-flow",
    "font",
    "gap",
    "grid",
    "grid-area",
    "grid-column",
    "grid-row",
    "grid-template",
    "inset",
    "list-style",
    "margin",
    "mask",
    "offset",
    "outline",
    "overflow",
    "padding",
    "place-content",
    "place-items",
    "place-self",
    "scroll-margin",
    "scroll-padding",
    "text-decoration",
    "text-emphasis",
    "transition",
];

const SHORTHANDS_OF_LONGHANDS: &[&str] = &[
    "border-block-color",
    "border-block-style",
    "border-block-width",
    "border-horizontal-color",
    "border-horizontal-style",
    "border-horizontal-width",
    "border-inline-color",
    "border-inline-style",
    "border-inline-width",
    "border-vertical-color",
    "border-vertical-style",
    "border-vertical-width",
    "contain-intrinsic-size",
    "inset-block",
    "inset-inline",
    "margin-block",
    "margin-horizontal",
    "margin-inline",
    "margin-vertical",
    "padding-block",
    "padding-horizontal",
    "padding-inline",
    "padding-vertical",
    "scroll-margin-block",
    "scroll-margin-inline",
    "scroll-padding-block",
    "scroll-padding-inline",
];

const PHYSICAL_LONGHANDS: &[&str] = &[
    "border-bottom-color",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "border-bottom-style",
    "border-bottom-width",
    "border-left-color",
    "border-left-style",
    "border-left-width",
    "border-right-color",
    "border-right-style",
    "border-right-width",
    "border-top-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-top-style",
    "border-top-width",
    "bottom",
    "height",
    "left",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "overflow-x",
    "overflow-y",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "right",
    "scroll-margin-bottom",
    "scroll-margin-left",
    "scroll-margin-right",
    "scroll-margin-top",
    "scroll-padding-bottom",
    "scroll-padding-left",
    "scroll-padding-right",
    "scroll-padding-top",
    "top",
    "width",
];

const PSEUDO_CLASS_PRIORITIES: &[(&str, f64)] = &[
    (":is", 40.0),
    (":where", 40.0),
    (":not", 40.0),
    (":has", 45.0),
    (":dir", 50.0),
    (":lang", 51.0),
    (":first-child", 52.0),
    (":first-of-type", 53.0),
    (":last-child", 54.0),
    (":last-of-type", 55.0),
    (":only-child", 56.0),
    (":only-of-type", 57.0),
    (":nth-child", 60.0),
    (":nth-last-child", 61.0),
    (":nth-of-type", 62.0),
    (":nth-last-of-type", 63.0),
    (":empty", 70.0),
    (":link", 80.0),
    (":any-link", 81.0),
    (":local-link", 82.0),
    (":target-within", 83.0),
    (":target", 84.0),
    (":visited", 85.0),
    (":enabled", 91.0),
    (":disabled", 92.0),
    (":required", 93.0),
    (":optional", 94.0),
    (":read-only", 95.0),
    (":read-write", 96.0),
    (":placeholder-shown", 97.0),
    (":in-range", 98.0),
    (":out-of-range", 99.0),
    (":default", 100.0),
    (":checked", 101.0),
    (":indeterminate", 101.0),
    (":blank", 102.0),
    (":valid", 103.0),
    (":invalid", 104.0),
    (":user-invalid", 105.0),
    (":autofill", 110.0),
    (":picture-in-picture", 120.0),
    (":modal", 121.0),
    (":fullscreen", 122.0),
    (":paused", 123.0),
    (":playing", 124.0),
    (":current", 125.0),
    (":past", 126.0),
    (":future", 127.0),
    (":hover", 130.0),
    (":focus-within", 140.0),
    (":focus", 150.0),
    (":focus-visible", 160.0),
    (":active", 170.0),
];

/// Weight of one key: a dashed property name or a condition
pub fn get_priority(key: &str) -> f64 {
    if key.starts_with("--") {
        return CUSTOM_PROPERTY;
    }
    if key.starts_with("@supports") {
        return SUPPORTS;
    }
    if key.starts_with("@media") {
        return MEDIA;
    }
    if key.starts_with("@container") {
        return CONTAINER;
    }
    if key.starts_with("var(--") {
        return CONSTANT_REFERENCE;
    }
    if key.starts_with("::") {
        return PSEUDO_ELEMENT;
    }
    if key.starts_with(':') {
        let name = key.split('(').next().unwrap_or(key);
        return PSEUDO_CLASS_PRIORITIES
            .iter()
            .find(|(pseudo, _)| *pseudo == name)
            .map(|(_, priority)| *priority)
            .unwrap_or(DEFAULT_PSEUDO_CLASS);
    }

    if SHORTHANDS_OF_SHORTHANDS.contains(&key) {
        SHORTHAND_OF_SHORTHANDS
    } else if SHORTHANDS_OF_LONGHANDS.contains(&key) {
        SHORTHAND_OF_LONGHANDS
    } else if PHYSICAL_LONGHANDS.contains(&key) {
        PHYSICAL_LONGHAND
    } else {
        LOGICAL_LONGHAND
    }
}

/// Property weight plus the weight of every condition
pub fn rule_priority(dashed_property: &str, pseudos: &[String], at_rules: &[String], const_rules: &[String]) -> f64 {
    get_priority(dashed_property)
        + pseudos.iter().map(|p| get_priority(p)).sum::<f64>()
        + at_rules.iter().map(|a| get_priority(a)).sum::<f64>()
        + const_rules.iter().map(|c| get_priority(c)).sum::<f64>()
}
