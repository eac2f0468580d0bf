//! Name sanitization, path splitting and duplicate-suffix handling.

use crate::types::{PLACEHOLDER_NAME, SEPARATOR, SEPARATOR_REPLACEMENT};

/// Sanitize a raw name for use as a single path segment.
///
/// Separators become `\`, surrounding whitespace is trimmed, and an empty
/// result is replaced by the placeholder since the empty name belongs to Root.
pub fn fix_name(raw: &str) -> String {
    let fixed = raw.replace(SEPARATOR, &SEPARATOR_REPLACEMENT.to_string());
    let trimmed = fixed.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split a path into its non-empty segments.
///
/// # Examples
///
/// ```
/// use folio::tree::names::split_directories;
///
/// assert_eq!(split_directories("/a//b/c/"), vec!["a", "b", "c"]);
/// assert!(split_directories("").is_empty());
/// ```
pub fn split_directories(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Recognize a trailing `" (N)"` suffix with `N >= 2`.
///
/// Returns the base name and `N` when the suffix is present.
pub fn is_duplicate_name(name: &str) -> Option<(&str, usize)> {
    let inner = name.strip_suffix(')')?;
    let open = inner.rfind(" (")?;
    let digits = &inner[open + 2..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: usize = digits.parse().ok()?;
    if number < 2 {
        return None;
    }
    Some((&name[..open], number))
}

/// Return `name` if it is free, otherwise the first free `"base (N)"`.
///
/// Any existing `(N)` suffix is stripped before probing `base (2)`,
/// `base (3)`, … up to and including `base (max_duplicates)`. Returns `None`
/// for an empty name or when every candidate is taken.
pub fn obtain_unique_string<F>(name: &str, mut is_taken: F, max_duplicates: usize) -> Option<String>
where
    F: FnMut(&str) -> bool,
{
    if name.is_empty() {
        return None;
    }
    if !is_taken(name) {
        return Some(name.to_string());
    }

    let base = is_duplicate_name(name).map(|(base, _)| base).unwrap_or(name);
    (2..=max_duplicates)
        .map(|i| format!("{} ({})", base, i))
        .find(|candidate| !is_taken(candidate))
}

/// Bump a duplicate suffix: `"x (N)"` becomes `"x (N+1)"`, anything else gets `" (2)"`.
pub fn increment_duplicate(name: &str) -> String {
    match is_duplicate_name(name) {
        Some((base, number)) => match number.checked_add(1) {
            Some(next) => format!("{} ({})", base, next),
            None => format!("{} (2)", name),
        },
        None => format!("{} (2)", name),
    }
}
