use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::{FindOptions, Matcher, Walk, WalkControl, WalkEntry};
use crate::fs::FileSystem;

/// One traversal: the top-level root or a symlinked directory below it.
struct Job {
    /// Symlinked subtrees get a trailing separator so the link is followed.
    root: PathBuf,
    max_depth: Option<usize>,
    /// Real paths of every root on the chain that led here, this one included.
    ancestors: Vec<PathBuf>,
    /// The search root rather than a symlinked subtree.
    top_level: bool,
}

/// Result of one job, in walk order. `Subtree` marks where the results of a
/// later job belong.
enum Slot {
    Match(PathBuf),
    Subtree(usize),
}

pub(super) struct Search<'a> {
    pub(super) walker: &'a dyn Walk,
    pub(super) fs: &'a dyn FileSystem,
    pub(super) pattern: &'a str,
    pub(super) options: &'a FindOptions,
    pub(super) matcher: &'a dyn Matcher,
}

impl Search<'_> {
    /// Drain a FIFO of jobs starting at `root`, then splice every subtree's
    /// matches in at its link's position.
    pub(super) fn run(&self, root: PathBuf) -> Vec<PathBuf> {
        debug!(root = %root.display(), pattern = self.pattern, "searching tree");
        let ancestors = self.fs.real_path(&root).into_iter().collect();
        let mut queue = VecDeque::from([Job {
            root,
            max_depth: self.options.max_depth,
            ancestors,
            top_level: true,
        }]);
        let mut segments = Vec::new();
        let mut next_id = 1;

        while let Some(job) = queue.pop_front() {
            let segment = self.search_job(&job, &mut |subtree| {
                queue.push_back(subtree);
                next_id += 1;
                next_id - 1
            });
            segments.push(segment);
        }
        flatten(segments)
    }

    fn search_job(&self, job: &Job, schedule: &mut dyn FnMut(Job) -> usize) -> Vec<Slot> {
        trace!(root = %job.root.display(), max_depth = ?job.max_depth, "walking");
        let mut slots = Vec::new();
        self.walker.walk(&job.root, &mut |event| match event {
            Ok(entry) => self.visit(job, entry, &mut slots, schedule),
            Err(err) => {
                trace!(path = %err.path().display(), %err, "skipping unreadable entry");
                WalkControl::Continue
            }
        });
        slots
    }

    fn visit(
        &self,
        job: &Job,
        entry: WalkEntry,
        slots: &mut Vec<Slot>,
        schedule: &mut dyn FnMut(Job) -> usize,
    ) -> WalkControl {
        let Ok(relative) = entry.path.strip_prefix(&job.root) else {
            trace!(path = %entry.path.display(), "entry outside search root");
            return WalkControl::Continue;
        };
        // The search root is a candidate named "."; a subtree root was
        // already evaluated as the link that led to it.
        if relative.as_os_str().is_empty() {
            if job.top_level
                && self.options.match_dirs
                && self.matcher.matches(self.pattern, Path::new("."))
            {
                slots.push(Slot::Match(entry.path.clone()));
            }
            return WalkControl::Continue;
        }

        let depth = relative.components().count() - 1;
        if job.max_depth.is_some_and(|max| depth > max) {
            return if entry.is_dir {
                WalkControl::SkipSubtree
            } else {
                WalkControl::Continue
            };
        }

        let link_to_dir = entry.is_symlink && self.fs.stat(&entry.path).is_ok_and(|s| s.is_dir);
        let eligible = if entry.is_dir || link_to_dir {
            self.options.match_dirs
        } else {
            self.options.match_files
        };
        if eligible && self.matcher.matches(self.pattern, relative) {
            slots.push(Slot::Match(entry.path.clone()));
        }

        if link_to_dir {
            if let Some(subtree) = self.subtree(job, &entry.path, depth) {
                slots.push(Slot::Subtree(schedule(subtree)));
            }
        }
        WalkControl::Continue
    }

    /// Job for the directory behind `link`, found at `depth` below the
    /// current root, or `None` when the budget is spent or the link leads
    /// back into its own ancestry.
    fn subtree(&self, job: &Job, link: &Path, depth: usize) -> Option<Job> {
        // Entries under the link sit `depth + 1` levels deeper than the
        // link's own parent level.
        let max_depth = match job.max_depth {
            None => None,
            Some(max) => Some(max.checked_sub(depth + 1)?),
        };

        let target = match self.fs.real_path(link) {
            Ok(target) => target,
            Err(err) => {
                trace!(link = %link.display(), %err, "cannot resolve symlink");
                return None;
            }
        };
        let encloses_link = link
            .parent()
            .and_then(|parent| self.fs.real_path(parent).ok())
            .is_some_and(|parent| parent.starts_with(&target));
        if encloses_link || job.ancestors.contains(&target) {
            debug!(
                link = %link.display(),
                target = %target.display(),
                "symlink cycle, not descending"
            );
            return None;
        }

        let mut ancestors = job.ancestors.clone();
        ancestors.push(target);
        Some(Job {
            root: link.join(""),
            max_depth,
            ancestors,
            top_level: false,
        })
    }
}

fn flatten(segments: Vec<Vec<Slot>>) -> Vec<PathBuf> {
    let mut segments: Vec<Option<Vec<Slot>>> = segments.into_iter().map(Some).collect();
    let mut found = Vec::new();
    let Some(first) = segments.first_mut().and_then(Option::take) else {
        return found;
    };

    let mut stack = vec![first.into_iter()];
    while let Some(top) = stack.last_mut() {
        match top.next() {
            Some(Slot::Match(path)) => found.push(path),
            Some(Slot::Subtree(id)) => {
                if let Some(segment) = segments.get_mut(id).and_then(Option::take) {
                    stack.push(segment.into_iter());
                }
            }
            None => {
                stack.pop();
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_splices_subtrees_in_place() {
        let segments = vec![
            vec![
                Slot::Match("a".into()),
                Slot::Subtree(1),
                Slot::Match("z".into()),
            ],
            vec![Slot::Match("link/b".into()), Slot::Subtree(2)],
            vec![Slot::Match("link/inner/c".into())],
        ];
        assert_eq!(
            flatten(segments),
            ["a", "link/b", "link/inner/c", "z"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn flatten_of_nothing_is_empty() {
        assert!(flatten(Vec::new()).is_empty());
    }
}
