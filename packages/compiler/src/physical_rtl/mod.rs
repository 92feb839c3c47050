//! Logical to physical translation per writing direction
//!
//! `ltr` always produces a declaration; `rtl` only produces one when the
//! mirrored declaration differs.

mod ltr;
mod rtl;

pub use ltr::generate_ltr;
pub use rtl::generate_rtl;

/// A `(property, value)` pair with a dashed property name
pub type Declaration = (String, String);

/// Legacy logical names, mapped for both directions regardless of options.
/// Each entry is `(logical, ltr physical, rtl physical)`.
const LEGACY_PROPERTIES: &[(&str, &str, &str)] = &[
    ("margin-start", "margin-left", "margin-right"),
    ("margin-end", "margin-right", "margin-left"),
    ("padding-start", "padding-left", "padding-right"),
    ("padding-end", "padding-right", "padding-left"),
    ("border-start", "border-left", "border-right"),
    ("border-end", "border-right", "border-left"),
    ("border-start-width", "border-left-width", "border-right-width"),
    ("border-end-width", "border-right-width", "border-left-width"),
    ("border-start-color", "border-left-color", "border-right-color"),
    ("border-end-color", "border-right-color", "border-left-color"),
    ("border-start-style", "border-left-style", "border-right-style"),
    ("border-end-style", "border-right-style", "border-left-style"),
    ("border-top-start-radius", "border-top-left-radius", "border-top-right-radius"),
    ("border-top-end-radius", "border-top-right-radius", "border-top-left-radius"),
    ("border-bottom-start-radius", "border-bottom-left-radius", "border-bottom-right-radius"),
    ("border-bottom-end-radius", "border-bottom-right-radius", "border-bottom-left-radius"),
    ("start", "left", "right"),
    ("end", "right", "left"),
];

/// Standard inline logical properties, mapped only with the logical styles polyfill
const INLINE_PROPERTIES: &[(&str, &str, &str)] = &[
    ("margin-inline-start", "margin-left", "margin-right"),
    ("margin-inline-end", "margin-right", "margin-left"),
    ("padding-inline-start", "padding-left", "padding-right"),
    ("padding-inline-end", "padding-right", "padding-left"),
    ("border-inline-start", "border-left", "border-right"),
    ("border-inline-end", "border-right", "border-left"),
    ("border-inline-start-width", "border-left-width", "border-right-width"),
    ("border-inline-end-width", "border-right-width", "border-left-width"),
    ("border-inline-start-color", "border-left-color", "border-right-color"),
    ("border-inline-end-color", "border-right-color", "border-left-color"),
    ("border-inline-start-style", "border-left-style", "border-right-style"),
    ("border-inline-end-style", "border-right-style", "border-left-style"),
    ("border-start-start-radius", "border-top-left-radius", "border-top-right-radius"),
    ("border-start-end-radius", "border-top-right-radius", "border-top-left-radius"),
    ("border-end-start-radius", "border-bottom-left-radius", "border-bottom-right-radius"),
    ("border-end-end-radius", "border-bottom-right-radius", "border-bottom-left-radius"),
    ("inset-inline-start", "left", "right"),
    ("inset-inline-end", "right", "left"),
];

fn lookup(table: &[(&str, &'static str, &'static str)], property: &str) -> Option<(&'static str, &'static str)> {
    table
        .iter()
        .find(|(logical, _, _)| *logical == property)
        .map(|(_, ltr, rtl)| (*ltr, *rtl))
}

/// Physical names for a logical property as `(ltr, rtl)`
fn physical_property(property: &str, polyfill: bool) -> Option<(&'static str, &'static str)> {
    lookup(LEGACY_PROPERTIES, property).or_else(|| {
        if polyfill {
            lookup(INLINE_PROPERTIES, property)
        } else {
            None
        }
    })
}

fn is_float_start(value: &str) -> bool {
    matches!(value, "start" | "inline-start" | "var(--logical-float-start)")
}

fn is_float_end(value: &str) -> bool {
    matches!(value, "end" | "inline-end" | "var(--logical-float-end)")
}

/// Replace `start`/`end` words in a background position
fn map_position_words(value: &str, start: &str, end: &str) -> Option<String> {
    let words: Vec<&str> = value.split(' ').collect();
    if !words.iter().any(|word| *word == "start" || *word == "end") {
        return None;
    }
    Some(
        words
            .into_iter()
            .map(|word| match word {
                "start" => start,
                "end" => end,
                other => other,
            })
            .collect::<Vec<_>>()
            .join(" "),
    )
}
