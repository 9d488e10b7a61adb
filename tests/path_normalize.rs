use treefind::path;

fn native(p: &str) -> String {
    path::from_slash(p)
}

#[test]
fn test_join_then_rel_round_trips_to_clean_target() {
    let cases = [
        ("a/b", "a/b/c/d"),
        ("a/b/c", "a/x"),
        ("/usr/local", "/usr/bin/env"),
        (".", "x/y"),
    ];
    for (base, target) in cases {
        let relative = path::rel(base, target).unwrap();
        assert_eq!(
            path::join([base, relative.as_str()]),
            path::clean(target),
            "rel({base:?}, {target:?}) = {relative:?}"
        );
    }
}

#[test]
fn test_rel_refuses_mixed_rooting_and_climbs() {
    assert!(path::rel("/a", "b").is_err());
    assert!(path::rel("a", "/b").is_err());
    assert!(path::rel("../a", "b").is_err());
}

#[test]
fn test_rel_error_names_both_paths() {
    let err = path::rel("/root", "child").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("/root"), "{msg}");
    assert!(msg.contains("child"), "{msg}");
}

#[test]
fn test_split_recombines() {
    for input in ["a/b/c.txt", "c.txt", "/c.txt", "dir/"] {
        let (dir, file) = path::split(input);
        assert_eq!(format!("{dir}{file}"), native(input));
    }
}

#[test]
fn test_name_helpers() {
    assert_eq!(path::base("a/b/report.tar.gz"), "report.tar.gz");
    assert_eq!(path::ext("a/b/report.tar.gz"), ".gz");
    assert_eq!(path::base_no_ext("a/b/report.tar.gz"), "report.tar");
    assert_eq!(path::base("a/b/"), "b");
    assert_eq!(path::base(""), ".");
    assert_eq!(path::ext("a.d/file"), "");
    assert_eq!(path::dir("a/b/c"), native("a/b"));
    assert_eq!(path::dir("file"), ".");
}

#[test]
fn test_abs_is_absolute_and_clean() {
    let resolved = path::abs("x/../y").unwrap();
    assert!(path::is_abs(&resolved));
    assert_eq!(path::base(&resolved), "y");
    assert_eq!(path::clean(&resolved), resolved);
}

#[test]
fn test_volume_name() {
    if cfg!(windows) {
        assert_eq!(path::volume_name("C:/Users/me"), "C:");
        assert_eq!(path::volume_name("//host/share/dir"), "\\\\host\\share");
    } else {
        assert_eq!(path::volume_name("/usr/bin"), "");
        assert_eq!(path::volume_name("C:/Users"), "");
    }
}

#[test]
fn test_smart_helpers_keep_windows_style_everywhere() {
    assert_eq!(path::join_smart(None, &["C:\\Users", "me"]), "C:\\Users\\me");
    assert_eq!(
        path::convert_path_separators("docs/guide.md", "C:\\work"),
        "docs\\guide.md"
    );
    assert_eq!(path::count_path_separator("C:\\a\\b"), 2);
}

#[test]
fn test_eval_symlinks_resolves_real_directory() {
    let tmp = tempfile::TempDir::new().unwrap();
    let resolved = path::eval_symlinks(tmp.path().to_str().unwrap()).unwrap();
    assert_eq!(
        std::path::PathBuf::from(resolved),
        std::fs::canonicalize(tmp.path()).unwrap()
    );
    assert!(path::eval_symlinks(&format!("{}/missing", tmp.path().display())).is_err());
}
