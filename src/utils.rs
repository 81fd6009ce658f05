//! Pure string and slice helpers shared across the skiff commands.

use std::collections::HashSet;

/// Ensures `s` does not exceed `max` bytes when `cond` is met.
///
/// Truncation backs off to the nearest character boundary, so the result may
/// be shorter than `max` bytes for multi-byte input but never splits a code
/// point.
///
/// # Examples
///
/// ```
/// use skiff_connect::utils::truncate_if;
///
/// assert_eq!(truncate_if("abcdef", 3, true), "abc");
/// assert_eq!(truncate_if("abcdef", 3, false), "abcdef");
/// ```
pub fn truncate_if(s: &str, max: usize, cond: bool) -> &str {
    if !cond || s.len() <= max {
        return s;
    }

    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Converts an arbitrary name into a single word without special shell
/// characters.
///
/// Every character outside `[a-zA-Z0-9-]` becomes `_`, runs of `_` collapse
/// to one, and leading/trailing `_` are trimmed.
///
/// # Examples
///
/// ```
/// use skiff_connect::utils::sanitize_token;
///
/// assert_eq!(sanitize_token("Hello, World!!"), "Hello_World");
/// assert_eq!(sanitize_token("___a___"), "a");
/// ```
pub fn sanitize_token(s: &str) -> String {
    let replaced = regex_lite::Regex::new("[^a-zA-Z0-9-]")
        .unwrap()
        .replace_all(s, "_");
    let collapsed = regex_lite::Regex::new("__+")
        .unwrap()
        .replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// Splits a Unix path into its directory and final segment.
///
/// Trailing slashes are stripped first; forward-slash semantics apply
/// regardless of the host OS. `.` stands in for an empty directory
/// component or a fully consumed path.
pub fn split_unix_path(full_path: &str) -> (String, String) {
    let trimmed = full_path.trim_end_matches('/');

    match trimmed.rfind('/') {
        Some(0) => ("/".to_string(), trimmed[1..].to_string()),
        Some(idx) => (trimmed[..idx].to_string(), trimmed[idx + 1..].to_string()),
        None if trimmed.is_empty() => (".".to_string(), ".".to_string()),
        None => (".".to_string(), trimmed.to_string()),
    }
}

/// Returns the distinct values of `items`. Output order is unspecified.
pub fn deduplicate(items: &[String]) -> Vec<String> {
    let encountered: HashSet<&String> = items.iter().collect();
    encountered.into_iter().cloned().collect()
}
