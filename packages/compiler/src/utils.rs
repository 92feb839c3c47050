/// Convert a camelCase style key to its CSS property name
///
/// Examples:
/// - `marginStart` → `margin-start`
/// - `WebkitAppearance` → `-webkit-appearance`
/// - `msTransform` → `-ms-transform`
/// - `--brand-color` is returned untouched
pub fn dashify(key: &str) -> String {
    if key.starts_with("--") {
        return key.to_string();
    }

    let mut dashed = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            dashed.push('-');
            dashed.push(ch.to_ascii_lowercase());
        } else {
            dashed.push(ch);
        }
    }

    if dashed.starts_with("ms-") {
        dashed.insert(0, '-');
    }
    dashed
}

/// Strip the `var(...)` wrapper from a key such as `var(--brand)`
pub fn unwrap_var(key: &str) -> Option<&str> {
    key.strip_prefix("var(")
        .and_then(|inner| inner.strip_suffix(')'))
}
