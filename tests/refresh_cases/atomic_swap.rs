//! Integration tests for generation replacement.

use brief::index::INDEX_FILE_NAME;
use brief::pages::{Generation, PageStore};
use brief::refresh::Installer;

use super::support::write_zip;

#[test]
/// What: A staged generation that is dropped before commit changes nothing.
///
/// Inputs:
/// - Live generation with `old`; a second archive with `new` staged and dropped.
///
/// Output:
/// - Readers still see `old`; the staging directory is gone.
fn uncommitted_stage_leaves_live_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = dir.path().to_path_buf();
    let user_root = cache.join("tldr");
    let installer = Installer::new(cache.clone(), user_root.clone());

    let first = cache.join("first.zip");
    write_zip(&first, &[("pages/common/old.md", "# old\n")]);
    installer.install(&first, |_| {}).expect("first install");
    let live_index = std::fs::read(user_root.join(INDEX_FILE_NAME)).expect("index");

    let second = cache.join("second.zip");
    write_zip(&second, &[("pages/common/new.md", "# new\n")]);
    let staged = installer.stage(&second, &mut |_| {}).expect("stage");
    assert!(staged.root().join("pages.en/common/new.md").is_file());
    let staging_dir = staged.root().to_path_buf();
    drop(staged);
    assert!(!staging_dir.exists());

    let store = PageStore::new(cache.join("system"), user_root.clone());
    assert_eq!(store.active_generation(), Generation::User);
    assert_eq!(store.resolve_page("en", "common", "old"), "# old\n");
    assert!(!store.page_path("en", "common", "new").exists());
    assert_eq!(
        std::fs::read(user_root.join(INDEX_FILE_NAME)).expect("index"),
        live_index
    );
}

#[test]
/// What: Committing replaces the old tree in one step and removes it afterwards.
fn commit_swaps_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = dir.path().to_path_buf();
    let user_root = cache.join("tldr");
    let installer = Installer::new(cache.clone(), user_root.clone());

    let first = cache.join("first.zip");
    write_zip(&first, &[("pages/common/old.md", "# old\n")]);
    installer.install(&first, |_| {}).expect("first install");
    assert!(!first.exists());

    let second = cache.join("second.zip");
    write_zip(&second, &[("repo/pages/linux/new.md", "# new\n")]);
    let index = installer.install(&second, |_| {}).expect("second install");
    assert_eq!(index.commands("en", "linux"), Some(&["new".to_string()][..]));

    let store = PageStore::new(cache.join("system"), user_root.clone());
    assert_eq!(store.resolve_page("en", "linux", "new"), "# new\n");
    assert!(!store.page_path("en", "common", "old").exists());
    assert!(!cache.join("tldr.previous").exists());
}

#[test]
/// What: A failed swap puts the previous generation back.
///
/// Inputs:
/// - Live generation with `old`; a staged generation whose tree vanished before commit,
///   so the rename into place fails after the old tree was moved aside.
///
/// Output:
/// - `commit` returns an error; `old` still resolves, `commands.json` is unchanged and no
///   `tldr.previous` is left behind.
fn failed_commit_restores_previous_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = dir.path().to_path_buf();
    let user_root = cache.join("tldr");
    let installer = Installer::new(cache.clone(), user_root.clone());

    let first = cache.join("first.zip");
    write_zip(&first, &[("pages/common/old.md", "# old\n")]);
    installer.install(&first, |_| {}).expect("first install");
    let live_index = std::fs::read(user_root.join(INDEX_FILE_NAME)).expect("index");

    let second = cache.join("second.zip");
    write_zip(&second, &[("pages/common/new.md", "# new\n")]);
    let staged = installer.stage(&second, &mut |_| {}).expect("stage");
    std::fs::remove_dir_all(staged.root()).expect("remove staged tree");
    assert!(staged.commit(&user_root).is_err());

    let store = PageStore::new(cache.join("system"), user_root.clone());
    assert_eq!(store.active_generation(), Generation::User);
    assert_eq!(store.resolve_page("en", "common", "old"), "# old\n");
    assert_eq!(
        std::fs::read(user_root.join(INDEX_FILE_NAME)).expect("index"),
        live_index
    );
    assert!(!cache.join("tldr.previous").exists());
}
