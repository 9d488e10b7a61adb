//! Pattern search over a directory tree.
//!
//! [`TreeMatcher`] walks a tree with a [`Walk`] primitive, asks a
//! [`Matcher`] about each eligible entry and follows symlinked directories as
//! extra subtrees, with the depth budget rebased for each one.

mod matcher;
mod search;
mod walk;

use std::path::{Path, PathBuf};

use crate::fs::{FileSystem, RealFs};

pub use matcher::{GlobName, Matcher, RegexName, RegexPath};
pub use walk::{LexicalWalk, Visit, Walk, WalkControl, WalkEntry, WalkdirWalk};

/// Configuration for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    /// Deepest level below the root that is matched, counted as separators
    /// in the relative path (0 = direct children only). `None` for
    /// unlimited.
    pub max_depth: Option<usize>,
    /// Whether regular files (and symlinks to non-directories) may match.
    pub match_files: bool,
    /// Whether directories (and symlinks to directories) may match.
    pub match_dirs: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            match_files: true,
            match_dirs: false,
        }
    }
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the depth budget from a signed value; negative means unlimited.
    pub fn with_signed_depth(self, max_depth: i64) -> Self {
        self.with_max_depth(usize::try_from(max_depth).ok())
    }

    pub fn with_files(mut self, match_files: bool) -> Self {
        self.match_files = match_files;
        self
    }

    pub fn with_dirs(mut self, match_dirs: bool) -> Self {
        self.match_dirs = match_dirs;
        self
    }
}

/// Directory-tree matching engine.
///
/// Stateless between calls; the walker and filesystem default to the real
/// disk and can be swapped for tests.
///
/// ```no_run
/// use treefind::find::{FindOptions, GlobName, TreeMatcher};
///
/// let found = TreeMatcher::new().find(
///     "src",
///     "*.rs",
///     &FindOptions::new().with_max_depth(Some(1)),
///     Some(&GlobName::new()),
/// );
/// for path in found {
///     println!("{}", path.display());
/// }
/// ```
#[derive(Clone, Copy)]
pub struct TreeMatcher<'a> {
    walker: &'a dyn Walk,
    fs: &'a dyn FileSystem,
}

impl Default for TreeMatcher<'_> {
    fn default() -> Self {
        Self {
            walker: &WalkdirWalk,
            fs: &RealFs,
        }
    }
}

impl<'a> TreeMatcher<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the traversal primitive.
    pub fn with_walker(mut self, walker: &'a dyn Walk) -> Self {
        self.walker = walker;
        self
    }

    /// Replace the filesystem used for stat and symlink resolution.
    pub fn with_fs(mut self, fs: &'a dyn FileSystem) -> Self {
        self.fs = fs;
        self
    }

    /// Collect every entry under `root` accepted by `matcher`.
    ///
    /// `root` may use `/` on any platform. When it names a file, the matcher
    /// is asked once about `root` itself; a directory root is a directory
    /// candidate named `.`. Results are `root` joined with each matching
    /// relative path, in walk order; the contents of a symlinked
    /// directory directly follow the link. Unreadable entries and invalid
    /// patterns simply produce no matches, and a missing `matcher` yields an
    /// empty result.
    pub fn find(
        &self,
        root: impl AsRef<Path>,
        pattern: &str,
        options: &FindOptions,
        matcher: Option<&dyn Matcher>,
    ) -> Vec<PathBuf> {
        let Some(matcher) = matcher else {
            return Vec::new();
        };
        let root = native_root(root.as_ref());

        if let Ok(stat) = self.fs.stat(&root) {
            if !stat.is_dir {
                return if matcher.matches(pattern, &root) {
                    vec![root]
                } else {
                    Vec::new()
                };
            }
        }

        search::Search {
            walker: self.walker,
            fs: self.fs,
            pattern,
            options,
            matcher,
        }
        .run(root)
    }
}

impl std::fmt::Debug for TreeMatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeMatcher").finish_non_exhaustive()
    }
}

fn native_root(root: &Path) -> PathBuf {
    match root.to_str() {
        Some(text) => PathBuf::from(crate::path::from_slash(text)),
        None => root.to_path_buf(),
    }
}

/// Glob-match base names under `root` with the default walker.
pub fn find_files_match_name(
    root: impl AsRef<Path>,
    pattern: &str,
    options: &FindOptions,
) -> Vec<PathBuf> {
    TreeMatcher::new().find(root, pattern, options, Some(&GlobName::new()))
}

/// Regex-search relative paths under `root` with the default walker.
pub fn find_files_match_regex_path(
    root: impl AsRef<Path>,
    pattern: &str,
    options: &FindOptions,
) -> Vec<PathBuf> {
    TreeMatcher::new().find(root, pattern, options, Some(&RegexPath::new()))
}

/// Regex-search base names under `root` with the default walker.
pub fn find_files_match_regex_name(
    root: impl AsRef<Path>,
    pattern: &str,
    options: &FindOptions,
) -> Vec<PathBuf> {
    TreeMatcher::new().find(root, pattern, options, Some(&RegexName::new()))
}
