use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::{EntryInfo, FileStat, FileSystem};

/// Same limit the Linux kernel applies before reporting `ELOOP`.
const MAX_SYMLINK_HOPS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File,
    Symlink(PathBuf),
}

/// In-memory `FileSystem` for deterministic tests.
///
/// Paths are plain keys; parents are created on demand. Symlink targets may
/// be absolute or relative to the link's directory.
///
/// ```
/// use std::path::Path;
/// use treefind::fs::{FileSystem, MemoryFs};
///
/// let fs = MemoryFs::new()
///     .file("/data/a.txt")
///     .symlink("/data/alias", "/data");
/// assert!(fs.stat(Path::new("/data/alias")).unwrap().is_dir);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, Node>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and any missing parents).
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::Dir);
        self
    }

    /// Add an empty regular file (and any missing parents).
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::File);
        self
    }

    /// Add a symbolic link at `path` pointing to `target`.
    pub fn symlink(mut self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), Node::Symlink(target.as_ref().to_path_buf()));
        self
    }

    /// Make listing the directory at `path` fail with `PermissionDenied`.
    pub fn unreadable(mut self, path: impl AsRef<Path>) -> Self {
        self.unreadable.insert(normalize(path.as_ref()));
        self
    }

    fn insert(&mut self, path: &Path, node: Node) {
        let key = normalize(path);
        for ancestor in key.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
        self.nodes.insert(key, node);
    }

    /// Resolve symlinks along `path`. The final component is only followed
    /// when `follow_last` is set.
    fn resolve(&self, path: &Path, follow_last: bool) -> io::Result<PathBuf> {
        let mut rest: VecDeque<OsString> = components(path);
        let mut current = PathBuf::new();
        let mut hops = 0;

        while let Some(part) = rest.pop_front() {
            if part == ".." {
                current.pop();
                continue;
            }
            current.push(&part);

            let Some(Node::Symlink(target)) = self.nodes.get(&current) else {
                continue;
            };
            if rest.is_empty() && !follow_last {
                break;
            }
            hops += 1;
            if hops > MAX_SYMLINK_HOPS {
                return Err(io::Error::other(format!(
                    "{}: too many levels of symbolic links",
                    path.display()
                )));
            }
            current.pop();
            let mut next = components(&current.join(target));
            next.extend(rest.drain(..));
            rest = next;
            current = PathBuf::new();
        }
        Ok(current)
    }

    fn lookup(&self, path: &Path, follow_last: bool) -> io::Result<(PathBuf, &Node)> {
        let key = self.resolve(path, follow_last)?;
        match self.nodes.get(&key) {
            Some(node) => Ok((key, node)),
            None => Err(not_found(path)),
        }
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let (_, node) = self.lookup(path, false)?;
        Ok(match node {
            Node::Dir => FileStat {
                is_dir: true,
                is_symlink: false,
            },
            Node::File => FileStat {
                is_dir: false,
                is_symlink: false,
            },
            Node::Symlink(_) => FileStat {
                is_dir: matches!(self.lookup(path, true), Ok((_, Node::Dir))),
                is_symlink: true,
            },
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        let (key, node) = self.lookup(path, true)?;
        if *node != Node::Dir {
            return Err(io::Error::other(format!(
                "{}: not a directory",
                path.display()
            )));
        }
        if self.unreadable.contains(&key) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{}: permission denied", path.display()),
            ));
        }
        Ok(self
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(key.as_path()))
            .filter_map(|(child, node)| {
                Some(EntryInfo {
                    name: child.file_name()?.to_os_string(),
                    is_dir: *node == Node::Dir,
                    is_symlink: matches!(node, Node::Symlink(_)),
                })
            })
            .collect())
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        self.lookup(path, true).map(|(key, _)| key)
    }
}

fn components(path: &Path) -> VecDeque<OsString> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_os_string())
        .collect()
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryFs {
        MemoryFs::new()
            .file("/r/a.txt")
            .dir("/r/sub")
            .file("/r/sub/b.txt")
            .symlink("/r/link", "sub")
            .symlink("/r/dangling", "/nowhere")
    }

    #[test]
    fn parents_are_created() {
        let fs = sample();
        assert!(fs.stat(Path::new("/r")).unwrap().is_dir);
        assert!(fs.stat(Path::new("/")).unwrap().is_dir);
    }

    #[test]
    fn relative_symlink_resolves_against_its_directory() {
        let fs = sample();
        let stat = fs.stat(Path::new("/r/link")).unwrap();
        assert!(stat.is_dir && stat.is_symlink);
        assert_eq!(
            fs.real_path(Path::new("/r/link/b.txt")).unwrap(),
            PathBuf::from("/r/sub/b.txt")
        );
    }

    #[test]
    fn dangling_symlink_is_not_a_dir() {
        let stat = sample().stat(Path::new("/r/dangling")).unwrap();
        assert!(!stat.is_dir && stat.is_symlink);
    }

    #[test]
    fn read_dir_lists_immediate_children_through_links() {
        let fs = sample();
        let names: Vec<_> = fs
            .read_dir(Path::new("/r/link"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec![OsString::from("b.txt")]);
    }

    #[test]
    fn self_loop_reports_error() {
        let fs = MemoryFs::new().symlink("/loop", "/loop");
        assert!(fs.real_path(Path::new("/loop")).is_err());
    }

    #[test]
    fn unreadable_directory_denies_listing() {
        let fs = sample().unreadable("/r/sub");
        let err = fs.read_dir(Path::new("/r/sub")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
