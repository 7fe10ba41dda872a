//! Identifier and string-literal sanitizing for generated scripts.

/// Turn arbitrary text into a valid Python identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading `_`
/// is added when the first character is not an ASCII letter or `_`.
/// Empty input yields `"_"`.
pub fn sanitize_function_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    match sanitized.chars().next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => sanitized,
        _ => format!("_{sanitized}"),
    }
}

/// File stem for a page name: lowercased, then sanitized.
pub fn page_stem(page_name: &str) -> String {
    sanitize_function_name(&page_name.to_lowercase())
}

/// Escape quotes so the text can sit inside a Python string literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\'', "\\'").replace('"', "\\\"")
}
