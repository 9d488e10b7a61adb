//! Match predicates consulted by the tree matcher.

use globset::{Glob, GlobMatcher};
use regex::Regex;
use std::cell::RefCell;
use std::path::Path;
use tracing::debug;

/// Decides whether `candidate` matches `pattern`.
///
/// The tree matcher passes each entry's path relative to the search root as
/// `candidate` (`.` for a directory root, the root itself when it is a
/// file). The pattern is handed over untouched. A pattern that fails to
/// compile never matches.
///
/// Any `Fn(&str, &Path) -> bool` closure is a `Matcher`.
pub trait Matcher {
    fn matches(&self, pattern: &str, candidate: &Path) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(&str, &Path) -> bool,
{
    fn matches(&self, pattern: &str, candidate: &Path) -> bool {
        self(pattern, candidate)
    }
}

/// Last pattern compiled by a matcher, including a failed compilation, so a
/// walk compiles its pattern once.
#[derive(Debug)]
struct PatternCache<T> {
    slot: RefCell<Option<(String, Option<T>)>>,
}

impl<T> Default for PatternCache<T> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }
}

impl<T> PatternCache<T> {
    fn test(
        &self,
        pattern: &str,
        compile: impl FnOnce(&str) -> Option<T>,
        check: impl FnOnce(&T) -> bool,
    ) -> bool {
        let mut slot = self.slot.borrow_mut();
        let fresh = matches!(&*slot, Some((cached, _)) if cached == pattern);
        if !fresh {
            *slot = Some((pattern.to_string(), compile(pattern)));
        }
        match &*slot {
            Some((_, Some(compiled))) => check(compiled),
            _ => false,
        }
    }
}

fn base_name(candidate: &Path) -> &Path {
    candidate.file_name().map(Path::new).unwrap_or(candidate)
}

fn compile_glob(pattern: &str) -> Option<GlobMatcher> {
    match Glob::new(pattern) {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(err) => {
            debug!(pattern, %err, "invalid glob pattern, nothing will match");
            None
        }
    }
}

fn compile_regex(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            debug!(pattern, %err, "invalid regex, nothing will match");
            None
        }
    }
}

/// Shell-style glob (`*`, `?`, `[...]`) against the entry's base name.
#[derive(Debug, Default)]
pub struct GlobName {
    cache: PatternCache<GlobMatcher>,
}

impl GlobName {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Matcher for GlobName {
    fn matches(&self, pattern: &str, candidate: &Path) -> bool {
        self.cache.test(pattern, compile_glob, |glob| {
            glob.is_match(base_name(candidate))
        })
    }
}

/// Regular expression searched anywhere in the full relative path.
///
/// Separators are native, so on Windows a pattern meant to cross directories
/// has to match `\`.
#[derive(Debug, Default)]
pub struct RegexPath {
    cache: PatternCache<Regex>,
}

impl RegexPath {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Matcher for RegexPath {
    fn matches(&self, pattern: &str, candidate: &Path) -> bool {
        self.cache.test(pattern, compile_regex, |re| {
            re.is_match(&candidate.to_string_lossy())
        })
    }
}

/// Regular expression searched in the entry's base name only.
#[derive(Debug, Default)]
pub struct RegexName {
    cache: PatternCache<Regex>,
}

impl RegexName {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Matcher for RegexName {
    fn matches(&self, pattern: &str, candidate: &Path) -> bool {
        self.cache.test(pattern, compile_regex, |re| {
            re.is_match(&base_name(candidate).to_string_lossy())
        })
    }
}
