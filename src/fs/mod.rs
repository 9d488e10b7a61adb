//! Read-only filesystem access used by the walker and the tree matcher.

mod memory;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

pub use memory::MemoryFs;

/// What `stat` reports about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// The path, with symlinks followed, names a directory.
    pub is_dir: bool,
    /// The path itself is a symbolic link.
    pub is_symlink: bool,
}

/// One immediate child of a directory, as read without following links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: OsString,
    /// The entry itself is a directory (false for a symlink to one).
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Minimal read-only filesystem abstraction.
///
/// `RealFs` goes to disk; `MemoryFs` keeps a tree in memory so traversal can
/// be exercised without touching real disk state.
pub trait FileSystem {
    /// Stat `path`, following symlinks for `is_dir`.
    ///
    /// A dangling symlink is not an error: it reports `is_dir == false` and
    /// `is_symlink == true`.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Immediate children of the directory at `path`, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>>;

    /// Canonical location of `path` with every symlink resolved.
    fn real_path(&self, path: &Path) -> io::Result<PathBuf>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let link = std::fs::symlink_metadata(path)?;
        let is_symlink = link.file_type().is_symlink();
        let is_dir = if is_symlink {
            std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            link.is_dir()
        };
        Ok(FileStat { is_dir, is_symlink })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            entries.push(EntryInfo {
                name: entry.file_name(),
                is_dir: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
            });
        }
        Ok(entries)
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}
