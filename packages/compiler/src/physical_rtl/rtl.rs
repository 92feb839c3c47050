use super::{is_float_end, is_float_start, map_position_words, physical_property, Declaration};
use crate::options::CompileOptions;
use crate::value_parser::{is_length_like, split_commas, split_whitespace};

const CURSOR_FLIPS: &[(&str, &str)] = &[
    ("e-resize", "w-resize"),
    ("w-resize", "e-resize"),
    ("ne-resize", "nw-resize"),
    ("nw-resize", "ne-resize"),
    ("se-resize", "sw-resize"),
    ("sw-resize", "se-resize"),
    ("nesw-resize", "nwse-resize"),
    ("nwse-resize", "nesw-resize"),
];

/// Right-to-left declaration, or `None` when it would equal the LTR one
pub fn generate_rtl(property: &str, value: &str, options: &CompileOptions) -> Option<Declaration> {
    if let Some((_, rtl)) = physical_property(property, options.enable_logical_styles_polyfill) {
        return Some((rtl.to_string(), value.to_string()));
    }

    let flipped = match property {
        "float" | "clear" if is_float_start(value) => Some("right".to_string()),
        "float" | "clear" if is_float_end(value) => Some("left".to_string()),
        "background-position" => map_position_words(value, "right", "left"),
        "box-shadow" | "text-shadow" if options.enable_legacy_value_flipping => flip_shadow(value),
        "cursor" if options.enable_legacy_value_flipping => CURSOR_FLIPS
            .iter()
            .find(|(from, _)| *from == value)
            .map(|(_, to)| to.to_string()),
        _ => None,
    };

    flipped.map(|value| (property.to_string(), value))
}

fn flip_sign(length: &str) -> String {
    if length == "0" {
        length.to_string()
    } else if let Some(positive) = length.strip_prefix('-') {
        positive.to_string()
    } else {
        format!("-{}", length.trim_start_matches('+'))
    }
}

/// Negate the horizontal offset of every shadow definition
fn flip_shadow(value: &str) -> Option<String> {
    let definitions: Vec<String> = split_commas(value)
        .into_iter()
        .map(|definition| {
            let mut flipped = false;
            split_whitespace(&definition)
                .into_iter()
                .map(|part| {
                    if !flipped && is_length_like(&part) {
                        flipped = true;
                        flip_sign(&part)
                    } else {
                        part
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    let rtl = definitions.join(",");
    if rtl == value {
        None
    } else {
        Some(rtl)
    }
}
