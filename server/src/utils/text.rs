/// Lookup key for a name or code: surrounding whitespace removed, lower-cased.
/// Diacritics are kept as they are.
pub fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// `Some` only for values carrying something besides whitespace.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
