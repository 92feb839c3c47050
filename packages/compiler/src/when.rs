//! State-observer selectors
//!
//! These build pseudo keys that let an element react to a pseudo-class on a
//! marked ancestor, descendant or sibling. The results are used like any
//! other pseudo-class key:
//!
//! ```text
//! { color: { default: "black", ":where(.x-default-marker:hover *)": "blue" } }
//! ```

use crate::error::{CompileError, CompileResult};
use crate::hash;
use crate::options::CompileOptions;

/// Simple pseudo-classes that can be observed
const OBSERVABLE_PSEUDOS: &[&str] = &[
    ":active",
    ":autofill",
    ":checked",
    ":default",
    ":disabled",
    ":empty",
    ":enabled",
    ":first-child",
    ":focus",
    ":focus-visible",
    ":focus-within",
    ":hover",
    ":indeterminate",
    ":invalid",
    ":last-child",
    ":only-child",
    ":optional",
    ":placeholder-shown",
    ":read-only",
    ":read-write",
    ":required",
    ":target",
    ":user-invalid",
    ":valid",
    ":visited",
];

/// Class name of the shared default marker
pub fn default_marker(options: &CompileOptions) -> String {
    format!("{}-default-marker", options.class_name_prefix)
}

/// A named marker, for observing one specific element
pub fn define_marker(name: &str, options: &CompileOptions) -> String {
    hash::class_name(&options.class_name_prefix, &format!("marker:{}", name))
}

fn validate_pseudo(pseudo: &str) -> CompileResult<()> {
    if pseudo.starts_with("::") {
        return Err(CompileError::invalid_pseudo(
            pseudo,
            "pseudo-elements cannot be observed",
        ));
    }
    if !OBSERVABLE_PSEUDOS.contains(&pseudo) {
        return Err(CompileError::invalid_pseudo(
            pseudo,
            "only simple pseudo-classes can be observed",
        ));
    }
    Ok(())
}

fn marker_selector(pseudo: &str, marker: Option<&str>, options: &CompileOptions) -> CompileResult<String> {
    validate_pseudo(pseudo)?;
    let marker = marker
        .map(str::to_string)
        .unwrap_or_else(|| default_marker(options));
    Ok(format!(".{}{}", marker, pseudo))
}

/// Matches when a marked ancestor is in `pseudo`
pub fn ancestor(pseudo: &str, marker: Option<&str>, options: &CompileOptions) -> CompileResult<String> {
    let marked = marker_selector(pseudo, marker, options)?;
    Ok(format!(":where({} *)", marked))
}

/// Matches when a marked descendant is in `pseudo`
pub fn descendant(pseudo: &str, marker: Option<&str>, options: &CompileOptions) -> CompileResult<String> {
    let marked = marker_selector(pseudo, marker, options)?;
    Ok(format!(":where(:has({}))", marked))
}

/// Matches when a marked preceding sibling is in `pseudo`
pub fn sibling_before(pseudo: &str, marker: Option<&str>, options: &CompileOptions) -> CompileResult<String> {
    let marked = marker_selector(pseudo, marker, options)?;
    Ok(format!(":where({} ~ *)", marked))
}

/// Matches when a marked following sibling is in `pseudo`
pub fn sibling_after(pseudo: &str, marker: Option<&str>, options: &CompileOptions) -> CompileResult<String> {
    let marked = marker_selector(pseudo, marker, options)?;
    Ok(format!(":where(:has(~ {}))", marked))
}

/// Matches when any marked sibling is in `pseudo`
pub fn any_sibling(pseudo: &str, marker: Option<&str>, options: &CompileOptions) -> CompileResult<String> {
    let marked = marker_selector(pseudo, marker, options)?;
    Ok(format!(":where({} ~ *, :has(~ {}))", marked, marked))
}
