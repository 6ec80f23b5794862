//! Integration tests for failed refreshes and their user-facing messages.

use std::time::Duration;

use brief::refresh::{RefreshConfig, RefreshOutcome, Refresher, StartRefresh};

use super::support::{Reply, refused_url, sample_archive, serve, serve_silent, write_zip};

async fn run(config: RefreshConfig) -> RefreshOutcome {
    let StartRefresh::Started(handle) = Refresher::new(config).start() else {
        panic!("refresh must start");
    };
    handle.wait().await
}

/// Seed a working user generation so failures can be checked against it.
fn seed_user_generation(cache: &std::path::Path) {
    let archive = cache.join("seed.zip");
    std::fs::create_dir_all(cache).expect("mkdir");
    write_zip(&archive, &[("pages/common/seed.md", "# seed\n")]);
    brief::refresh::Installer::new(cache.to_path_buf(), cache.join("tldr"))
        .install(&archive, |_| {})
        .expect("seed install");
}

#[tokio::test]
/// What: A refused connection reports "No network connection" and keeps the old cache.
async fn connection_refused_reports_no_network() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_user_generation(dir.path());
    let outcome = run(RefreshConfig::new(refused_url().await, dir.path().to_path_buf())).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "No network connection");
    assert!(dir.path().join("tldr/pages.en/common/seed.md").is_file());
    assert!(!dir.path().join("tldr.zip.part").exists());
}

#[tokio::test]
/// What: A server that never answers hits the read timeout.
async fn stalled_server_reports_timeout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = RefreshConfig::new(serve_silent().await, dir.path().to_path_buf());
    config.read_timeout = Duration::from_millis(300);
    let outcome = run(config).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Connection timed out");
}

#[tokio::test]
/// What: HTTP errors use the generic failure message.
async fn http_error_reports_update_failed() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_user_generation(dir.path());
    let reply = Reply {
        status: 404,
        body: b"missing".to_vec(),
        content_length: true,
    };
    let outcome = run(RefreshConfig::new(serve(reply, None).await, dir.path().to_path_buf())).await;
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Update failed: "), "{}", outcome.message);
    assert!(outcome.message.contains("404"));
    assert!(dir.path().join("tldr/pages.en/common/seed.md").is_file());
}

#[tokio::test]
/// What: A body that is not a zip fails without touching the live generation.
async fn corrupt_archive_keeps_previous_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_user_generation(dir.path());
    let before = std::fs::read(dir.path().join("tldr/commands.json")).expect("index");
    let url = serve(Reply::ok(b"not a zip at all".to_vec()), None).await;
    let outcome = run(RefreshConfig::new(url, dir.path().to_path_buf())).await;
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Update failed: "));
    let after = std::fs::read(dir.path().join("tldr/commands.json")).expect("index");
    assert_eq!(before, after);
    assert!(!dir.path().join("tldr.zip.part").exists());

    // A valid archive afterwards still installs.
    let url = serve(Reply::ok(sample_archive()), None).await;
    let outcome = run(RefreshConfig::new(url, dir.path().to_path_buf())).await;
    assert!(outcome.success, "{}", outcome.message);
    assert!(!dir.path().join("tldr/pages.en/common/seed.md").exists());
}
