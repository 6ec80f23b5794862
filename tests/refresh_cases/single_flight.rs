//! Integration tests for concurrent refresh requests.

use brief::refresh::{Phase, RefreshConfig, Refresher, StartRefresh};
use tokio::sync::watch;

use super::support::{Reply, sample_archive, serve};

#[tokio::test]
/// What: A second request while a run is in flight is rejected without disturbing it.
///
/// Inputs:
/// - Server held closed by a gate until the second request has been made.
///
/// Output:
/// - Second start is `AlreadyRunning`; the first run completes with an uninterrupted
///   progress stream; a later start is accepted again.
async fn second_request_is_rejected_while_running() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (open_tx, open_rx) = watch::channel(false);
    let url = serve(Reply::ok(sample_archive()), Some(open_rx)).await;
    let refresher = Refresher::new(RefreshConfig::new(url, dir.path().to_path_buf()));

    let StartRefresh::Started(handle) = refresher.start() else {
        panic!("first refresh must start");
    };
    assert!(refresher.is_running());
    assert!(matches!(refresher.clone().start(), StartRefresh::AlreadyRunning));
    assert!(matches!(refresher.start(), StartRefresh::AlreadyRunning));

    open_tx.send_replace(true);
    let mut events = Vec::new();
    let outcome = handle.drive(|e| events.push(e.clone()), |_| {}).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(events.first().map(|e| e.phase), Some(Phase::Downloading));
    assert_eq!(events.last().map(|e| e.phase), Some(Phase::Indexing));
    assert!(events.windows(2).all(|w| w[0].phase <= w[1].phase));

    let StartRefresh::Started(again) = refresher.start() else {
        panic!("a new run must be accepted after completion");
    };
    assert!(again.wait().await.success);
}
