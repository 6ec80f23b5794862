//! Integration tests for a complete download-and-install run.

use std::cell::RefCell;
use std::path::Path;

use brief::index::{INDEX_FILE_NAME, load_index_file};
use brief::pages::{Generation, PageStore};
use brief::refresh::{
    Phase, RefreshConfig, RefreshOutcome, RefreshProgress, Refresher, SUCCESS_MESSAGE,
    StartRefresh,
};

use super::support::{Reply, sample_archive, serve};

/// Run one refresh against `url` and collect every progress event.
async fn run(url: &str, cache: &Path) -> (Vec<RefreshProgress>, RefreshOutcome) {
    let refresher = Refresher::new(RefreshConfig::new(url, cache.to_path_buf()));
    let StartRefresh::Started(handle) = refresher.start() else {
        panic!("refresh must start");
    };
    let mut events = Vec::new();
    let outcome = handle.drive(|e| events.push(e.clone()), |_| {}).await;
    (events, outcome)
}

#[tokio::test]
/// What: A successful refresh installs a normalised, indexed user generation.
///
/// Inputs:
/// - Loopback server returning a GitHub-style archive with `Content-Length`.
///
/// Output:
/// - Success message, `pages.en` and `pages.de` live with an index, archive removed,
///   every indexed page resolvable, progress moving through all phases without going back.
async fn refresh_installs_user_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = dir.path().join("cache");
    let url = serve(Reply::ok(sample_archive()), None).await;

    let (events, outcome) = run(&url, &cache).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.message, SUCCESS_MESSAGE);

    let user_root = cache.join("tldr");
    assert!(user_root.join("pages.en/common/git.md").is_file());
    assert!(user_root.join("pages.de/common/git.md").is_file());
    assert!(!user_root.join("pages").exists());
    assert!(!user_root.join("README.md").exists());
    assert!(!user_root.join("scripts").exists());
    assert!(!cache.join("tldr.zip.part").exists());
    assert!(!cache.join("tldr.previous").exists());

    let store = PageStore::new(dir.path().join("system"), user_root.clone());
    assert_eq!(store.active_generation(), Generation::User);
    let index = store.load_index();
    let langs: Vec<String> = index.languages().into_iter().map(|l| l.code).collect();
    let mut sorted = langs.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["de".to_string(), "en".to_string()]);
    let platforms: Vec<String> = index.platforms().into_iter().map(|p| p.code).collect();
    assert_eq!(platforms.len(), 3);
    for (lang, by_platform) in &index.map {
        for (platform, commands) in by_platform {
            for cmd in commands {
                assert!(
                    store.page_path(lang, platform, cmd).is_file(),
                    "{lang}/{platform}/{cmd} must resolve"
                );
            }
        }
    }

    let first = events.first().expect("progress events");
    assert_eq!(first.phase, Phase::Downloading);
    assert_eq!(events.last().map(|e| e.phase), Some(Phase::Indexing));
    let mut last_phase = Phase::Downloading;
    let mut last_fraction = 0.0;
    for e in &events {
        assert!(e.phase >= last_phase);
        last_phase = e.phase;
        let f = e.fraction.expect("content length makes progress determinate");
        assert!(f >= last_fraction && f <= 1.0);
        last_fraction = f;
    }
    assert!(events.iter().any(|e| e.label.starts_with("Downloading... ")));
}

#[tokio::test]
/// What: Without `Content-Length` download progress is indeterminate but still succeeds.
async fn refresh_without_content_length() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut reply = Reply::ok(sample_archive());
    reply.content_length = false;
    let url = serve(reply, None).await;

    let (events, outcome) = run(&url, dir.path()).await;
    assert!(outcome.success, "{}", outcome.message);
    let downloads: Vec<&RefreshProgress> = events
        .iter()
        .filter(|e| e.phase == Phase::Downloading)
        .collect();
    assert!(!downloads.is_empty());
    assert!(downloads.iter().all(|e| e.fraction.is_none()));
    assert!(downloads.iter().all(|e| e.label.ends_with(" MB)")));
}

#[tokio::test]
/// What: Installing the same archive twice yields a byte-identical index.
async fn refresh_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = serve(Reply::ok(sample_archive()), None).await;
    let index_path = dir.path().join("tldr").join(INDEX_FILE_NAME);

    let (_, first) = run(&url, dir.path()).await;
    assert!(first.success);
    let before = std::fs::read(&index_path).expect("index after first run");
    let (_, second) = run(&url, dir.path()).await;
    assert!(second.success);
    let after = std::fs::read(&index_path).expect("index after second run");
    assert_eq!(before, after);
    assert_eq!(
        load_index_file(&index_path).expect("parse").command_count(),
        5
    );
}

#[tokio::test]
/// What: `finished` is delivered once, after every progress event.
async fn finished_follows_all_progress() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = serve(Reply::ok(sample_archive()), None).await;
    let refresher = Refresher::new(RefreshConfig::new(url, dir.path().to_path_buf()));
    let StartRefresh::Started(handle) = refresher.start() else {
        panic!("refresh must start");
    };
    let log = RefCell::new(Vec::new());
    let outcome = handle
        .drive(
            |_| log.borrow_mut().push("progress"),
            |_| log.borrow_mut().push("finished"),
        )
        .await;
    assert!(outcome.success);
    let log = log.into_inner();
    assert_eq!(log.iter().filter(|s| **s == "finished").count(), 1);
    assert_eq!(log.last(), Some(&"finished"));
    assert!(log.len() > 1);
    assert!(!refresher.is_running());
}
