//! Lexer for CSS property values using logos
//!
//! Only the structure the compiler needs is recognised: whitespace and
//! separators at the top level, function nesting, and the basic token
//! classes used by the shorthand splitters and the value normaliser.

use logos::Logos;

/// Token types for CSS values
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token(",")]
    Comma,
    #[token("/")]
    Slash,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    /// Function name including its opening paren, e.g. `calc(`
    #[regex(r"-?-?[a-zA-Z_][a-zA-Z0-9_-]*\(")]
    Function,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    #[regex(r"[-+]?([0-9]+(\.[0-9]+)?|\.[0-9]+)%")]
    Percentage,
    #[regex(r"[-+]?([0-9]+(\.[0-9]+)?|\.[0-9]+)[a-zA-Z]+")]
    Dimension,
    #[regex(r"[-+]?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    #[regex(r"#[a-zA-Z0-9_-]+")]
    Hash,

    #[regex(r"-?-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[regex(r"![ \t]*[iI][mM][pP][oO][rR][tT][aA][nN][tT]")]
    Important,
}

/// A lexed slice of a value. `token` is `None` for characters the lexer
/// does not classify (`.`, `:`, `*`, ...), which are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'src> {
    pub token: Option<ValueToken>,
    pub text: &'src str,
}

impl Lexeme<'_> {
    pub fn is(&self, token: ValueToken) -> bool {
        self.token == Some(token)
    }

    fn opens(&self) -> bool {
        matches!(
            self.token,
            Some(ValueToken::Function) | Some(ValueToken::OpenParen)
        )
    }

    fn closes(&self) -> bool {
        self.is(ValueToken::CloseParen)
    }
}

pub fn lex(value: &str) -> Vec<Lexeme<'_>> {
    ValueToken::lexer(value)
        .spanned()
        .map(|(token, span)| Lexeme {
            token: token.ok(),
            text: &value[span],
        })
        .collect()
}

/// Split on a separator token that appears outside of any function or
/// parenthesised group. Empty parts are dropped, parts are trimmed.
pub fn split_top_level(value: &str, separator: ValueToken) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for lexeme in lex(value) {
        if lexeme.opens() {
            depth += 1;
        } else if lexeme.closes() {
            depth = depth.saturating_sub(1);
        }

        if depth == 0 && lexeme.is(separator) {
            push_part(&mut parts, &mut current);
        } else {
            current.push_str(lexeme.text);
        }
    }
    push_part(&mut parts, &mut current);

    parts
}

fn push_part(parts: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
    current.clear();
}

/// `1px calc(2px + 3px) 4px` -> `["1px", "calc(2px + 3px)", "4px"]`
pub fn split_whitespace(value: &str) -> Vec<String> {
    split_top_level(value, ValueToken::Whitespace)
}

/// Comma separated definitions, e.g. multiple shadows
pub fn split_commas(value: &str) -> Vec<String> {
    split_top_level(value, ValueToken::Comma)
}

pub fn contains_top_level(value: &str, token: ValueToken) -> bool {
    let mut depth = 0usize;
    for lexeme in lex(value) {
        if lexeme.opens() {
            depth += 1;
        } else if lexeme.closes() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && lexeme.is(token) {
            return true;
        }
    }
    false
}

/// True when a function or parenthesised group is never closed
pub fn has_unclosed_function(value: &str) -> bool {
    let mut depth = 0isize;
    for lexeme in lex(value) {
        if lexeme.opens() {
            depth += 1;
        } else if lexeme.closes() {
            depth -= 1;
        }
    }
    depth > 0
}

/// Classify a standalone token, e.g. one part produced by `split_whitespace`
pub fn single_token(part: &str) -> Option<ValueToken> {
    match lex(part).as_slice() {
        [only] => only.token,
        _ => None,
    }
}

/// A number or a dimension, such as a shadow offset
pub fn is_length_like(part: &str) -> bool {
    matches!(
        single_token(part),
        Some(ValueToken::Dimension) | Some(ValueToken::Number)
    )
}
