//! Helpers that keep whichever separator style a path already uses.
//!
//! Unlike the rest of [`crate::path`], these recognise both `/` and `\` on
//! every platform, so a Windows-style path handled on Unix (or the reverse)
//! comes back in the style it went in.

use super::{join, rel, SEPARATOR};
use crate::error::PathError;

/// Separators recognised by the style-preserving helpers, in lookup order.
pub const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// First separator from [`PATH_SEPARATORS`] that occurs in `path`.
pub fn get_path_separator(path: &str) -> Option<char> {
    PATH_SEPARATORS.into_iter().find(|sep| path.contains(*sep))
}

pub fn has_end_path_separator(path: &str) -> bool {
    path.ends_with(&PATH_SEPARATORS[..])
}

/// Rewrite `path` to use the separator style found in `reference`.
///
/// Left unchanged when either string has no separator.
pub fn convert_path_separators(path: &str, reference: &str) -> String {
    match (get_path_separator(reference), get_path_separator(path)) {
        (Some(wanted), Some(found)) if wanted != found => swap_separator(path, found, wanted),
        _ => path.to_string(),
    }
}

/// Number of separators in `path`, counting only the style it uses first.
pub fn count_path_separator(path: &str) -> usize {
    match get_path_separator(path) {
        Some(sep) => path.matches(sep).count(),
        None => 0,
    }
}

/// [`join`](super::join) that answers in the separator style of the first
/// element containing one, falling back to `fallback` and then to the native
/// separator.
pub fn join_smart<S: AsRef<str>>(fallback: Option<char>, elems: &[S]) -> String {
    let parts: Vec<&str> = elems.iter().map(|elem| elem.as_ref()).collect();
    let style = parts
        .iter()
        .find_map(|part| get_path_separator(part))
        .or(fallback)
        .unwrap_or(SEPARATOR);
    let joined = join(&parts);
    if style == SEPARATOR {
        joined
    } else {
        swap_separator(&joined, SEPARATOR, style)
    }
}

/// [`rel`](super::rel) that answers in the separator style of `base`.
pub fn rel_smart(base: &str, target: &str, fallback: Option<char>) -> Result<String, PathError> {
    let style = get_path_separator(base)
        .or(fallback)
        .unwrap_or(SEPARATOR);
    let relative = rel(base, target)?;
    if style == SEPARATOR {
        Ok(relative)
    } else {
        Ok(swap_separator(&relative, SEPARATOR, style))
    }
}

fn swap_separator(path: &str, from: char, to: char) -> String {
    path.chars().map(|c| if c == from { to } else { c }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_detection_prefers_slash() {
        assert_eq!(get_path_separator("a/b\\c"), Some('/'));
        assert_eq!(get_path_separator("a\\b"), Some('\\'));
        assert_eq!(get_path_separator("abc"), None);
        assert!(has_end_path_separator("dir\\"));
        assert!(has_end_path_separator("dir/"));
        assert!(!has_end_path_separator("dir"));
    }

    #[test]
    fn convert_follows_reference() {
        assert_eq!(convert_path_separators("a/b/c", "x\\y"), "a\\b\\c");
        assert_eq!(convert_path_separators("a\\b", "x/y"), "a/b");
        assert_eq!(convert_path_separators("a/b", "plain"), "a/b");
        assert_eq!(convert_path_separators("plain", "x\\y"), "plain");
    }

    #[test]
    fn count_uses_detected_style() {
        assert_eq!(count_path_separator("a/b/c"), 2);
        assert_eq!(count_path_separator("a\\b"), 1);
        assert_eq!(count_path_separator("abc"), 0);
    }

    #[test]
    fn join_smart_uses_fallback_without_separators() {
        assert_eq!(join_smart(Some('\\'), &["a", "b"]), "a\\b");
        assert_eq!(join_smart(None, &["a", "b"]), format!("a{SEPARATOR}b"));
    }

    #[cfg(unix)]
    #[test]
    fn rel_smart_keeps_base_style() {
        assert_eq!(rel_smart("/a", "/a/b/c", None).unwrap(), "b/c");
        assert_eq!(rel_smart("a", "a/b/c", Some('\\')).unwrap(), "b\\c");
    }
}
