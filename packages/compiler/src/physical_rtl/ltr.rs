use super::{is_float_end, is_float_start, map_position_words, physical_property, Declaration};
use crate::options::CompileOptions;

/// Left-to-right declaration for a dashed property and a normalised value
pub fn generate_ltr(property: &str, value: &str, options: &CompileOptions) -> Declaration {
    if let Some((ltr, _)) = physical_property(property, options.enable_logical_styles_polyfill) {
        return (ltr.to_string(), value.to_string());
    }

    let value = match property {
        "float" | "clear" if is_float_start(value) => "left".to_string(),
        "float" | "clear" if is_float_end(value) => "right".to_string(),
        "background-position" => {
            map_position_words(value, "left", "right").unwrap_or_else(|| value.to_string())
        }
        _ => value.to_string(),
    };

    (property.to_string(), value)
}
