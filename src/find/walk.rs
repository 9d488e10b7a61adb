use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::WalkError;
use crate::fs::{EntryInfo, FileSystem};

/// One node reported by a [`Walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Root joined with the entry's relative path.
    pub path: PathBuf,
    /// 0 for the root, 1 for its children, and so on.
    pub depth: usize,
    /// The entry itself is a directory. A symlink to a directory is not,
    /// except for the root, which is always followed.
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// What the visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Do not descend into the directory just visited. Ignored for
    /// non-directories.
    SkipSubtree,
    /// Stop the walk.
    Abort,
}

/// Visitor callback handed to [`Walk::walk`].
pub type Visit<'a> = dyn FnMut(Result<WalkEntry, WalkError>) -> WalkControl + 'a;

/// Depth-first traversal primitive.
///
/// Implementations visit `root` first, then its contents in lexical name
/// order, parents before children. Symbolic links below the root are
/// reported but never followed. A directory that cannot be read is reported
/// as an `Err` and not descended into.
pub trait Walk {
    fn walk(&self, root: &Path, visit: &mut Visit<'_>);
}

/// Default [`Walk`] on the real filesystem, backed by `walkdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirWalk;

impl Walk for WalkdirWalk {
    fn walk(&self, root: &Path, visit: &mut Visit<'_>) {
        let mut iter = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(next) = iter.next() {
            let event = next.map_err(WalkError::from).map(|entry| WalkEntry {
                path: entry.path().to_path_buf(),
                depth: entry.depth(),
                is_dir: entry.file_type().is_dir(),
                is_symlink: entry.path_is_symlink(),
            });
            let is_dir = matches!(&event, Ok(entry) if entry.is_dir);

            match visit(event) {
                WalkControl::Continue => {}
                WalkControl::SkipSubtree => {
                    if is_dir {
                        iter.skip_current_dir();
                    }
                }
                WalkControl::Abort => break,
            }
        }
    }
}

/// [`Walk`] over any [`FileSystem`], used with `MemoryFs` in tests.
#[derive(Debug, Clone, Copy)]
pub struct LexicalWalk<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> LexicalWalk<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    fn children(&self, dir: &Path, depth: usize) -> Result<Vec<WalkEntry>, WalkError> {
        let mut entries = self.fs.read_dir(dir).map_err(|source| WalkError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries
            .into_iter()
            .map(|EntryInfo { name, is_dir, is_symlink }| WalkEntry {
                path: dir.join(name),
                depth,
                is_dir,
                is_symlink,
            })
            .collect())
    }
}

impl<F: FileSystem> Walk for LexicalWalk<'_, F> {
    fn walk(&self, root: &Path, visit: &mut Visit<'_>) {
        let stat = match self.fs.stat(root) {
            Ok(stat) => stat,
            Err(source) => {
                visit(Err(WalkError::Io {
                    path: root.to_path_buf(),
                    source,
                }));
                return;
            }
        };
        let root_entry = WalkEntry {
            path: root.to_path_buf(),
            depth: 0,
            is_dir: stat.is_dir,
            is_symlink: stat.is_symlink,
        };
        if visit(Ok(root_entry)) != WalkControl::Continue || !stat.is_dir {
            return;
        }

        // One iterator per open directory; the top of the stack is the
        // directory currently being listed.
        let mut stack = Vec::new();
        match self.children(root, 1) {
            Ok(children) => stack.push(children.into_iter()),
            Err(err) => {
                visit(Err(err));
                return;
            }
        }

        while let Some(top) = stack.last_mut() {
            let Some(entry) = top.next() else {
                stack.pop();
                continue;
            };
            let descend = entry.is_dir && !entry.is_symlink;
            let (path, depth) = (entry.path.clone(), entry.depth);

            match visit(Ok(entry)) {
                WalkControl::Abort => return,
                WalkControl::SkipSubtree => continue,
                WalkControl::Continue => {}
            }
            if !descend {
                continue;
            }
            match self.children(&path, depth + 1) {
                Ok(children) => stack.push(children.into_iter()),
                Err(err) => {
                    if visit(Err(err)) == WalkControl::Abort {
                        return;
                    }
                }
            }
        }
    }
}
