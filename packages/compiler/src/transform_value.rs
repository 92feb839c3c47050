//! Value normalisation applied before hashing
//!
//! Two authored values that mean the same thing should produce the same
//! class name, so numbers get their default unit and textual values are
//! rewritten into one canonical spelling.

use crate::error::{CompileError, CompileResult};
use crate::options::CompileOptions;
use crate::tree::Scalar;
use crate::value_parser::{has_unclosed_function, lex, Lexeme, ValueToken};

const UNITLESS_PROPERTIES: &[&str] = &[
    "animationIterationCount",
    "aspectRatio",
    "borderImageOutset",
    "borderImageSlice",
    "borderImageWidth",
    "columnCount",
    "fillOpacity",
    "flex",
    "flexGrow",
    "flexShrink",
    "floodOpacity",
    "fontSizeAdjust",
    "fontWeight",
    "gridArea",
    "gridColumn",
    "gridColumnEnd",
    "gridColumnStart",
    "gridRow",
    "gridRowEnd",
    "gridRowStart",
    "initialLetter",
    "lineClamp",
    "lineHeight",
    "mathDepth",
    "opacity",
    "order",
    "orphans",
    "scale",
    "stopOpacity",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeMiterlimit",
    "strokeOpacity",
    "strokeWidth",
    "tabSize",
    "WebkitLineClamp",
    "widows",
    "zIndex",
    "zoom",
];

const TIME_PROPERTIES: &[&str] = &[
    "animationDelay",
    "animationDuration",
    "transitionDelay",
    "transitionDuration",
    "voiceDuration",
];

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vh", "vw", "vmin", "vmax", "dvh", "dvw", "svh", "svw",
    "lvh", "lvw", "cm", "mm", "in", "pt", "pc", "q", "cqw", "cqh", "cqi", "cqb",
];

const CONTENT_KEYWORDS: &[&str] = &[
    "normal",
    "none",
    "open-quote",
    "close-quote",
    "no-open-quote",
    "no-close-quote",
    "inherit",
    "initial",
    "unset",
    "revert",
    "revert-layer",
];

/// Produce the canonical CSS text for one authored value
pub fn transform_value(key: &str, value: &Scalar, options: &CompileOptions) -> CompileResult<String> {
    match value {
        Scalar::Number(number) => Ok(transform_number(key, *number, options)),
        Scalar::Text(text) => {
            if has_unclosed_function(text) {
                return Err(CompileError::unclosed_function(key, text.as_str()));
            }
            if key == "content" || key == "hyphenateCharacter" {
                return Ok(quote_content(text));
            }
            Ok(normalize_value(text, key, options))
        }
    }
}

fn transform_number(key: &str, number: f64, options: &CompileOptions) -> String {
    let rounded = (number * 10000.0).round() / 10000.0;

    let text = if key == "fontSize" && options.enable_font_size_px_to_rem {
        format!("{}rem", format_number(rounded / 16.0))
    } else {
        format!("{}{}", format_number(rounded), number_suffix(key))
    };
    normalize_value(&text, key, options)
}

fn number_suffix(key: &str) -> &'static str {
    if key.starts_with("--") || UNITLESS_PROPERTIES.contains(&key) {
        ""
    } else if TIME_PROPERTIES.contains(&key) {
        "ms"
    } else {
        "px"
    }
}

/// `0.5` → `.5`, `-0.25` → `-.25`, `2.0` → `2`
pub fn format_number(number: f64) -> String {
    let text = if number.fract() == 0.0 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    };
    strip_leading_zero(&text)
}

fn strip_leading_zero(text: &str) -> String {
    if let Some(rest) = text.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = text.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else if let Some(rest) = text.strip_prefix("+0.") {
        format!("+.{}", rest)
    } else {
        text.to_string()
    }
}

/// Canonical spelling of a textual value
pub fn normalize_value(value: &str, key: &str, options: &CompileOptions) -> String {
    let lexemes = lex(value.trim());
    let mut out = String::with_capacity(value.len());

    for (index, lexeme) in lexemes.iter().enumerate() {
        match lexeme.token {
            Some(ValueToken::Whitespace) => {
                let after_open = matches!(out.chars().last(), None | Some(',') | Some('('));
                let before_close = matches!(
                    lexemes.get(index + 1).and_then(|next| next.token),
                    None | Some(ValueToken::Comma) | Some(ValueToken::CloseParen)
                );
                if !after_open && !before_close {
                    out.push(' ');
                }
            }
            Some(ValueToken::Comma) => {
                let trimmed_len = out.trim_end().len();
                out.truncate(trimmed_len);
                out.push(',');
            }
            Some(ValueToken::Dimension) => out.push_str(&normalize_dimension(lexeme, key, options)),
            Some(ValueToken::Number) | Some(ValueToken::Percentage) => {
                out.push_str(&strip_leading_zero(lexeme.text))
            }
            Some(ValueToken::String) => out.push_str(&normalize_quotes(lexeme.text)),
            _ => out.push_str(lexeme.text),
        }
    }

    out
}

fn normalize_dimension(lexeme: &Lexeme<'_>, key: &str, options: &CompileOptions) -> String {
    let text = lexeme.text;
    let unit_start = text
        .char_indices()
        .find(|(_, ch)| ch.is_ascii_alphabetic())
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    let (number_text, unit) = text.split_at(unit_start);
    let unit_lower = unit.to_ascii_lowercase();

    let Ok(number) = number_text.parse::<f64>() else {
        return text.to_string();
    };

    if number == 0.0 && LENGTH_UNITS.contains(&unit_lower.as_str()) {
        return "0".to_string();
    }

    if unit_lower == "px" && key == "fontSize" && options.enable_font_size_px_to_rem {
        return format!("{}rem", format_number(number / 16.0));
    }

    if unit_lower == "ms" {
        return if number >= 10.0 {
            format!("{}s", format_number(number / 1000.0))
        } else {
            format!("{}ms", format_number(number))
        };
    }

    format!("{}{}", strip_leading_zero(number_text), unit)
}

fn normalize_quotes(text: &str) -> String {
    match text.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(inner) if !inner.contains('"') => format!("\"{}\"", inner),
        _ => text.to_string(),
    }
}

fn quote_content(value: &str) -> String {
    let trimmed = value.trim();

    if CONTENT_KEYWORDS.contains(&trimmed) {
        return trimmed.to_string();
    }

    let starts_like_value = lex(trimmed).first().is_some_and(|first| {
        matches!(
            first.token,
            Some(ValueToken::Function) | Some(ValueToken::String)
        )
    });
    if starts_like_value {
        return trimmed.to_string();
    }

    format!("\"{}\"", trimmed)
}
