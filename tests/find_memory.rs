use std::path::{Path, PathBuf};
use treefind::find::{
    FindOptions, GlobName, LexicalWalk, RegexPath, TreeMatcher, Walk, WalkControl, WalkEntry,
};
use treefind::fs::MemoryFs;

fn sample_fs() -> MemoryFs {
    MemoryFs::new()
        .file("/t/a.txt")
        .file("/t/sub/b.txt")
        .file("/t/sub/deep/c.txt")
        .file("/ext/x.txt")
        .file("/ext/inner/y.txt")
        .symlink("/t/link", "/ext")
}

fn search(fs: &MemoryFs, pattern: &str, options: &FindOptions) -> Vec<PathBuf> {
    let walker = LexicalWalk::new(fs);
    TreeMatcher::new()
        .with_walker(&walker)
        .with_fs(fs)
        .find("/t", pattern, options, Some(&GlobName::new()))
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn test_link_contents_are_spliced_after_the_link() {
    let fs = sample_fs();
    assert_eq!(
        search(&fs, "*.txt", &FindOptions::new()),
        paths(&[
            "/t/a.txt",
            "/t/link/inner/y.txt",
            "/t/link/x.txt",
            "/t/sub/b.txt",
            "/t/sub/deep/c.txt",
        ])
    );
}

#[test]
fn test_repeated_search_gives_identical_results() {
    let fs = sample_fs();
    let options = FindOptions::new().with_dirs(true);
    let first = search(&fs, "*", &options);
    let second = search(&fs, "*", &options);
    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
}

#[test]
fn test_budget_rebases_through_link() {
    let fs = sample_fs();
    let depth = |d| FindOptions::new().with_max_depth(Some(d));

    assert_eq!(search(&fs, "*.txt", &depth(0)), paths(&["/t/a.txt"]));
    assert_eq!(
        search(&fs, "*.txt", &depth(1)),
        paths(&["/t/a.txt", "/t/link/x.txt", "/t/sub/b.txt"])
    );
    assert_eq!(search(&fs, "*.txt", &depth(2)).len(), 5);
}

#[test]
fn test_directory_matches_include_links() {
    let fs = sample_fs();
    let dirs = FindOptions::new().with_files(false).with_dirs(true);
    assert_eq!(
        search(&fs, "*", &dirs),
        paths(&["/t", "/t/link", "/t/link/inner", "/t/sub", "/t/sub/deep"])
    );
}

#[test]
fn test_link_to_enclosing_directory_is_not_followed() {
    let fs = MemoryFs::new()
        .file("/t/a.txt")
        .symlink("/t/again", "/t")
        .symlink("/t/sub/up", "..")
        .file("/t/sub/b.txt");
    assert_eq!(
        search(&fs, "*.txt", &FindOptions::new()),
        paths(&["/t/a.txt", "/t/sub/b.txt"])
    );
}

#[test]
fn test_link_chain_back_to_an_ancestor_stops() {
    let fs = MemoryFs::new()
        .file("/t/a.txt")
        .symlink("/t/out", "/o")
        .file("/o/o.txt")
        .symlink("/o/back", "/t");
    assert_eq!(
        search(&fs, "*.txt", &FindOptions::new()),
        paths(&["/t/a.txt", "/t/out/o.txt"])
    );
}

#[test]
fn test_dangling_and_file_links_are_files() {
    let fs = MemoryFs::new()
        .file("/t/real.txt")
        .symlink("/t/alias.txt", "real.txt")
        .symlink("/t/dangling.txt", "/nowhere");
    assert_eq!(
        search(&fs, "*.txt", &FindOptions::new()),
        paths(&["/t/alias.txt", "/t/dangling.txt", "/t/real.txt"])
    );
}

#[test]
fn test_unreadable_directory_is_skipped() {
    let fs = MemoryFs::new()
        .file("/t/a.txt")
        .file("/t/locked/secret.txt")
        .file("/t/z.txt")
        .unreadable("/t/locked");
    assert_eq!(
        search(&fs, "*.txt", &FindOptions::new()),
        paths(&["/t/a.txt", "/t/z.txt"])
    );
}

#[test]
fn test_regex_path_is_relative_to_each_walk_root() {
    let fs = sample_fs();
    let walker = LexicalWalk::new(&fs);
    let found = TreeMatcher::new()
        .with_walker(&walker)
        .with_fs(&fs)
        .find("/t", "^inner", &FindOptions::new(), Some(&RegexPath::new()));
    assert_eq!(found, paths(&["/t/link/inner/y.txt"]));
}

#[test]
fn test_matcher_sees_relative_candidates() {
    let fs = sample_fs();
    let walker = LexicalWalk::new(&fs);
    let seen = std::cell::RefCell::new(Vec::new());
    let record = |_: &str, candidate: &Path| {
        seen.borrow_mut().push(candidate.to_path_buf());
        false
    };
    let found = TreeMatcher::new()
        .with_walker(&walker)
        .with_fs(&fs)
        .find("/t", "", &FindOptions::new().with_max_depth(Some(0)), Some(&record));

    assert!(found.is_empty());
    assert_eq!(seen.into_inner(), paths(&["a.txt"]));
}

#[test]
fn test_lexical_walk_can_abort() {
    let fs = sample_fs();
    let mut visited = Vec::new();
    LexicalWalk::new(&fs).walk(Path::new("/t"), &mut |event| {
        let entry: WalkEntry = event.unwrap();
        visited.push(entry.path);
        if visited.len() == 2 {
            WalkControl::Abort
        } else {
            WalkControl::Continue
        }
    });
    assert_eq!(visited, paths(&["/t", "/t/a.txt"]));
}
