//! Lexical path manipulation over strings, aware of the platform separator.
//!
//! Every function accepts paths in either slash form or native form and
//! returns native form, except the `to_slash*` conversions. Nothing here
//! touches the filesystem apart from [`abs`] (current directory) and
//! [`eval_symlinks`].

mod separator;

use std::path::{Path, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::error::PathError;

pub use separator::{
    convert_path_separators, count_path_separator, get_path_separator, has_end_path_separator,
    join_smart, rel_smart, PATH_SEPARATORS,
};

/// Native path separator.
pub const SEPARATOR: char = MAIN_SEPARATOR;

/// Separator used in `PATH`-style lists.
pub const LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Whether `c` separates path elements on this platform.
pub fn is_separator(c: char) -> bool {
    std::path::is_separator(c)
}

/// Replace every native separator with `/`.
pub fn to_slash(path: &str) -> String {
    if SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(SEPARATOR, "/")
    }
}

/// Replace every `/` with the native separator.
pub fn from_slash(path: &str) -> String {
    if SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', MAIN_SEPARATOR_STR)
    }
}

/// Like [`to_slash`], but on Windows a slash path that starts with a
/// drive-letter token is rewritten to volume syntax first:
///
/// - `/C*` becomes `C:/*`
/// - `/C/Users` becomes `C:/Users`
/// - `C/Users` becomes `C:/Users` (only when `is_full_path` is set or the
///   path starts with `/`)
///
/// Paths without any `/` are left alone.
pub fn to_slash_smart(path: &str, is_full_path: bool) -> String {
    if cfg!(windows) && path.contains('/') && (is_full_path || path.starts_with('/')) {
        return to_slash(&drive_letter_form(path));
    }
    to_slash(path)
}

/// [`to_slash_smart`] followed by [`from_slash`].
pub fn from_slash_smart(path: &str, is_full_path: bool) -> String {
    from_slash(&to_slash_smart(path, is_full_path))
}

fn drive_letter_form(path: &str) -> String {
    let bytes = path.as_bytes();
    let unrooted = if bytes.first() == Some(&b'/') && bytes.get(1).is_some_and(u8::is_ascii_alphabetic)
    {
        match bytes.get(2) {
            Some(b'*') => format!("{}/{}", &path[1..2], &path[2..]),
            Some(b'/') => path[1..].to_string(),
            _ => path.to_string(),
        }
    } else {
        path.to_string()
    };

    let bytes = unrooted.as_bytes();
    if bytes.first().is_some_and(u8::is_ascii_alphabetic) && bytes.get(1) == Some(&b'/') {
        format!("{}:{}", &unrooted[..1], &unrooted[1..])
    } else {
        unrooted
    }
}

/// Length of the leading volume name: `C:` or `\\host\share` on Windows,
/// always zero elsewhere.
#[cfg(windows)]
fn volume_name_len(path: &str) -> usize {
    let bytes = path.as_bytes();
    let sep = |b: u8| b == b'\\' || b == b'/';
    let len = bytes.len();

    if len >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return 2;
    }
    if len >= 5 && sep(bytes[0]) && sep(bytes[1]) && !sep(bytes[2]) && bytes[2] != b'.' {
        let mut n = 3;
        while n < len - 1 {
            if sep(bytes[n]) {
                n += 1;
                if sep(bytes[n]) || bytes[n] == b'.' {
                    break;
                }
                while n < len && !sep(bytes[n]) {
                    n += 1;
                }
                return n;
            }
            n += 1;
        }
    }
    0
}

#[cfg(not(windows))]
fn volume_name_len(_path: &str) -> usize {
    0
}

/// Leading volume name of `path` (empty outside Windows).
pub fn volume_name(path: &str) -> String {
    let path = from_slash(path);
    path[..volume_name_len(&path)].to_string()
}

/// Shortest lexically equivalent path.
///
/// Repeated separators collapse to one, `.` elements are dropped, and `..`
/// removes the preceding element where one exists. A `..` directly after
/// the root is dropped. An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    let path = from_slash(path);
    if path.is_empty() {
        return ".".to_string();
    }
    let vol_len = volume_name_len(&path);
    let (volume, rest) = path.split_at(vol_len);
    if rest.is_empty() {
        // UNC share roots are already clean
        if vol_len > 1 && path.starts_with(is_separator) {
            return path;
        }
        return format!("{path}.");
    }

    let rooted = rest.starts_with(is_separator);
    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let mut out = String::with_capacity(path.len());
    out.push_str(volume);
    if rooted {
        out.push(SEPARATOR);
    }
    out.push_str(&parts.join(MAIN_SEPARATOR_STR));
    if !rooted && parts.is_empty() {
        out.push('.');
    }
    out
}

/// Split after the final separator into `(dir, file)`; `dir + file == path`.
pub fn split(path: &str) -> (String, String) {
    let path = from_slash(path);
    let vol_len = volume_name_len(&path);
    let at = path[vol_len..]
        .rfind(is_separator)
        .map_or(vol_len, |i| vol_len + i + 1);
    let (dir, file) = path.split_at(at);
    (dir.to_string(), file.to_string())
}

/// Split a `PATH`-style list. An empty string yields an empty list.
pub fn split_list(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    from_slash(list)
        .split(LIST_SEPARATOR)
        .map(str::to_string)
        .collect()
}

/// Join the non-empty elements with the native separator and [`clean`] the
/// result. Returns an empty string when every element is empty.
pub fn join<I, S>(elems: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = elems
        .into_iter()
        .map(|elem| from_slash(elem.as_ref()))
        .filter(|elem| !elem.is_empty())
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    clean(&parts.join(MAIN_SEPARATOR_STR))
}

/// Extension of the final element, including the dot. Empty when there is
/// none.
pub fn ext(path: &str) -> String {
    let path = from_slash(path);
    for (i, c) in path.char_indices().rev() {
        if is_separator(c) {
            break;
        }
        if c == '.' {
            return path[i..].to_string();
        }
    }
    String::new()
}

/// Last element of `path` with trailing separators removed.
///
/// Returns `.` for an empty path and a single separator for a path made of
/// separators only.
pub fn base(path: &str) -> String {
    let path = from_slash(path);
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(is_separator);
    let trimmed = &trimmed[volume_name_len(trimmed)..];
    let name = match trimmed.rfind(is_separator) {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    };
    if name.is_empty() {
        return SEPARATOR.to_string();
    }
    name.to_string()
}

/// [`base`] without its [`ext`].
pub fn base_no_ext(path: &str) -> String {
    let name = base(path);
    let extension = ext(path);
    match name.strip_suffix(extension.as_str()) {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

/// Everything but the last element, cleaned.
pub fn dir(path: &str) -> String {
    let path = from_slash(path);
    let vol_len = volume_name_len(&path);
    let (volume, rest) = path.split_at(vol_len);
    let end = rest.rfind(is_separator).map_or(0, |i| i + 1);
    let parent = clean(&rest[..end]);
    if parent == "." && vol_len > 2 {
        return volume.to_string();
    }
    format!("{volume}{parent}")
}

pub fn is_abs(path: &str) -> bool {
    Path::new(&from_slash(path)).is_absolute()
}

/// Absolute, cleaned form of `path`, resolved against the current directory
/// when relative. Symlinks are not resolved.
pub fn abs(path: &str) -> Result<String, PathError> {
    let native = from_slash(path);
    if is_abs(&native) {
        return Ok(clean(&native));
    }
    let cwd = std::env::current_dir().map_err(|source| PathError::CurrentDir {
        path: path.to_string(),
        source,
    })?;
    Ok(join([&*cwd.to_string_lossy(), native.as_str()]))
}

#[cfg(windows)]
fn same_word(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(not(windows))]
fn same_word(a: &str, b: &str) -> bool {
    a == b
}

/// Relative path that reaches `target` from `base`, so that
/// `join([base, rel(base, target)?])` equals `clean(target)`.
///
/// Fails when one path is rooted and the other is not, when the volumes
/// differ, or when `base` would have to climb through `..` elements.
pub fn rel(base: &str, target: &str) -> Result<String, PathError> {
    let base_clean = clean(base);
    let target_clean = clean(target);
    if same_word(&base_clean, &target_clean) {
        return Ok(".".to_string());
    }

    let not_relative = || PathError::NotRelative {
        base: base.to_string(),
        target: target.to_string(),
    };

    let (base_vol, base_rest) = base_clean.split_at(volume_name_len(&base_clean));
    let (target_vol, target_rest) = target_clean.split_at(volume_name_len(&target_clean));
    let base_rest = if base_rest == "." { "" } else { base_rest };
    let target_rest = if target_rest == "." { "" } else { target_rest };

    let base_rooted =
        base_rest.starts_with(is_separator) || (base_rest.is_empty() && base_vol.len() > 2);
    let target_rooted = target_rest.starts_with(is_separator);
    if base_rooted != target_rooted || !same_word(base_vol, target_vol) {
        return Err(not_relative());
    }

    let base_parts: Vec<&str> = base_rest.split(is_separator).filter(|p| !p.is_empty()).collect();
    let target_parts: Vec<&str> = target_rest
        .split(is_separator)
        .filter(|p| !p.is_empty())
        .collect();
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(b, t)| same_word(b, t))
        .count();

    let climb = &base_parts[common..];
    if climb.first() == Some(&"..") {
        return Err(not_relative());
    }

    let mut out: Vec<&str> = vec![".."; climb.len()];
    out.extend_from_slice(&target_parts[common..]);
    if out.is_empty() {
        return Ok(".".to_string());
    }
    Ok(out.join(MAIN_SEPARATOR_STR))
}

/// Resolve every symbolic link in `path` and return the canonical result.
pub fn eval_symlinks(path: &str) -> Result<String, PathError> {
    let native = from_slash(path);
    std::fs::canonicalize(&native)
        .map(|resolved| resolved.to_string_lossy().into_owned())
        .map_err(|source| PathError::io(native, source))
}
