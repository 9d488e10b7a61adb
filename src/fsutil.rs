//! Small filesystem conveniences built on the path helpers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::PathError;
use crate::path;

/// Whether the directory at `path` has no entries.
pub fn dir_is_empty(path: impl AsRef<Path>) -> io::Result<bool> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

/// Whether `path` exists and is a Unix domain socket.
#[cfg(unix)]
pub fn path_is_unix_socket(path: impl AsRef<Path>) -> bool {
    use std::os::unix::fs::FileTypeExt;

    std::fs::metadata(path).is_ok_and(|meta| meta.file_type().is_socket())
}

#[cfg(not(unix))]
pub fn path_is_unix_socket(_path: impl AsRef<Path>) -> bool {
    false
}

/// Whether `path` lies strictly below `parent`, comparing whole elements
/// of the absolute, cleaned forms.
pub fn path_is_child_of(path: &str, parent: &str) -> Result<bool, PathError> {
    let child = path::abs(path)?;
    let parent = path::abs(parent)?;
    if child == parent {
        return Ok(false);
    }
    Ok(Path::new(&child).starts_with(&parent))
}

/// First element of a `PATH`-style list that exists.
pub fn first_exist_path(list: &str) -> Option<String> {
    path::split_list(list)
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
}

/// The element of the `PATH`-style list `paths` that contains `path`.
pub fn get_path_in_paths(path: &str, paths: &str) -> Option<String> {
    path::split_list(paths)
        .into_iter()
        .find(|dir| path_is_child_of(path, dir).unwrap_or(false))
}

/// Whether `subpath` exists below any element of the `PATH`-style list.
pub fn path_has_subpath(subpath: &str, list: &str) -> bool {
    path::split_list(list)
        .iter()
        .any(|dir| Path::new(&path::join([dir.as_str(), subpath])).exists())
}

/// Write `data` to a fresh temporary file that outlives this call.
///
/// With a `filename`, the file gets that name inside a new temporary
/// directory; otherwise the name is random.
pub fn temp_file_create_with_content(data: &[u8], filename: Option<&str>) -> io::Result<PathBuf> {
    match filename.filter(|name| !name.is_empty()) {
        Some(name) => {
            let dir = tempfile::Builder::new().prefix("systempath").tempdir()?;
            std::fs::write(dir.path().join(name), data)?;
            Ok(dir.keep().join(name))
        }
        None => {
            let mut file = tempfile::NamedTempFile::new()?;
            file.write_all(data)?;
            let (_, path) = file.keep().map_err(|err| err.error)?;
            Ok(path)
        }
    }
}

/// Concatenate the contents of `files`, separated by a newline.
pub fn cat<P: AsRef<Path>>(files: &[P]) -> io::Result<String> {
    let mut contents = String::new();
    for file in files {
        let text = std::fs::read_to_string(file)?;
        if !contents.is_empty() {
            contents.push('\n');
        }
        contents.push_str(&text);
    }
    Ok(contents)
}

/// Drive letters with a mounted volume. Always empty outside Windows.
pub fn get_drives() -> Vec<String> {
    if !cfg!(windows) {
        return Vec::new();
    }
    ('A'..='Z')
        .filter(|letter| Path::new(&format!("{letter}:\\")).exists())
        .map(String::from)
        .collect()
}
