//! Toolchain search precedence and registration.

mod common;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use common::fake_toolchain;
use kodegen_bundler_universal::universal::{
    Error, Registration, Strategy, ToolSearchPaths, ToolchainQuery, locate,
};

struct Fixture {
    _tmp: tempfile::TempDir,
    root: PathBuf,
    source: PathBuf,
    start: PathBuf,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    let source = root.join("checkout/src");
    let start = root.join("checkout/tools/bin");
    std::fs::create_dir_all(&source).unwrap();
    std::fs::create_dir_all(&start).unwrap();
    Fixture {
        _tmp: tmp,
        root,
        source,
        start,
    }
}

fn query<'a>(
    source: Option<&'a Path>,
    search_paths: &'a [PathBuf],
    exec_path: Option<&'a OsString>,
    start: &'a Path,
) -> ToolchainQuery<'a> {
    ToolchainQuery {
        source_root: source,
        search_paths,
        exec_path: exec_path.map(|p| p.as_os_str()),
        start_dir: start,
        dir_name: "depot_tools",
        marker: "gclient.py",
    }
}

#[test]
fn vendored_copy_wins_over_every_other_strategy() {
    let fx = fixture();
    let vendored = fake_toolchain(&fx.source.join("third_party/depot_tools"));
    let on_search = fake_toolchain(&fx.root.join("search/depot_tools"));
    let on_path = fake_toolchain(&fx.root.join("bin"));
    fake_toolchain(&fx.root.join("checkout/depot_tools"));

    let search = vec![on_search];
    let exec = std::env::join_paths([&on_path]).unwrap();
    let located = locate(&query(Some(&fx.source), &search, Some(&exec), &fx.start)).unwrap();

    assert_eq!(located.path, vendored);
    assert_eq!(located.strategy, Strategy::Vendored);
    assert_eq!(located.registration, Registration::Prepend(vendored));
}

#[test]
fn search_path_wins_over_path_and_walk() {
    let fx = fixture();
    let on_search = fake_toolchain(&fx.root.join("search/depot_tools"));
    let on_path = fake_toolchain(&fx.root.join("bin"));
    fake_toolchain(&fx.root.join("checkout/depot_tools"));

    let search = vec![PathBuf::from(format!("{}/", on_search.display()))];
    let exec = std::env::join_paths([&on_path]).unwrap();
    let located = locate(&query(Some(&fx.source), &search, Some(&exec), &fx.start)).unwrap();

    assert_eq!(located.path, on_search);
    assert_eq!(located.strategy, Strategy::SearchPath);
}

#[test]
fn search_path_entry_must_be_named_like_the_toolchain() {
    let fx = fixture();
    let misnamed = fake_toolchain(&fx.root.join("search/tools"));
    let on_path = fake_toolchain(&fx.root.join("bin"));

    let search = vec![misnamed];
    let exec = std::env::join_paths([&on_path]).unwrap();
    let located = locate(&query(None, &search, Some(&exec), &fx.start)).unwrap();

    assert_eq!(located.path, on_path);
    assert_eq!(located.strategy, Strategy::ExecPath);
    assert_eq!(located.registration, Registration::Append(on_path));
}

#[test]
fn directory_without_marker_is_not_accepted() {
    let fx = fixture();
    std::fs::create_dir_all(fx.source.join("third_party/depot_tools")).unwrap();
    let fake = fx.root.join("search/depot_tools");
    std::fs::create_dir_all(&fake).unwrap();
    let walked = fake_toolchain(&fx.root.join("checkout/depot_tools"));

    let search = vec![fake];
    let located = locate(&query(Some(&fx.source), &search, None, &fx.start)).unwrap();

    assert_eq!(located.path, walked);
    assert_eq!(located.strategy, Strategy::UpwardWalk);
}

#[test]
fn upward_walk_finds_nearest_ancestor_first() {
    let fx = fixture();
    let near = fake_toolchain(&fx.root.join("checkout/tools/depot_tools"));
    fake_toolchain(&fx.root.join("depot_tools"));

    let located = locate(&query(None, &[], None, &fx.start)).unwrap();

    assert_eq!(located.path, near);
    assert_eq!(located.registration, Registration::Append(near));
}

#[test]
fn nothing_found_is_toolchain_not_found() {
    let fx = fixture();
    let exec = std::env::join_paths([fx.root.join("bin")]).unwrap();

    let err = locate(&query(Some(&fx.source), &[], Some(&exec), &fx.start)).unwrap_err();

    match err {
        Error::ToolchainNotFound { name, searched } => {
            assert_eq!(name, "depot_tools");
            assert_eq!(searched[0], fx.source.join("third_party/depot_tools"));
            assert_eq!(searched[1], fx.root.join("bin"));
        }
        other => panic!("expected ToolchainNotFound, got {:?}", other),
    }
}

#[test]
fn registration_makes_next_lookup_hit_the_search_path() {
    let fx = fixture();
    let walked = fake_toolchain(&fx.root.join("checkout/depot_tools"));
    let mut paths = ToolSearchPaths::default();

    let first = locate(&query(None, paths.entries(), None, &fx.start)).unwrap();
    assert_eq!(first.strategy, Strategy::UpwardWalk);
    paths.apply(&first.registration);

    let second = locate(&query(None, paths.entries(), None, &fx.start)).unwrap();
    assert_eq!(second.strategy, Strategy::SearchPath);
    assert_eq!(second.path, walked);

    paths.apply(&second.registration);
    assert_eq!(paths.entries(), &[walked]);
}
