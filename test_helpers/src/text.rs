//! Shared text helpers for behavioural step definitions.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Parses `a = 1, b = -2` style step text into integer bindings.
///
/// Returns `None` when any pair is malformed.
///
/// # Examples
///
/// ```
/// use dryspec_test_helpers::text::parse_integer_bindings;
///
/// assert_eq!(
///     parse_integer_bindings("a = 1, b = -2"),
///     Some(vec![("a".to_owned(), 1), ("b".to_owned(), -2)])
/// );
/// assert_eq!(parse_integer_bindings("a = one"), None);
/// ```
#[must_use]
pub fn parse_integer_bindings(text: &str) -> Option<Vec<(String, i64)>> {
    unquote(text)
        .split(',')
        .map(|pair| {
            let (raw_name, raw_value) = pair.split_once('=')?;
            let name = raw_name.trim();
            if name.is_empty() {
                return None;
            }
            let value = raw_value.trim().parse().ok()?;
            Some((name.to_owned(), value))
        })
        .collect()
}
