//! Command-line cache refresh.

use std::io::Write;

use brief::refresh::{ALREADY_RUNNING_MESSAGE, RefreshConfig, Refresher, StartRefresh};
use brief::settings::Settings;

/// What: Download the configured archive and install it as the user generation.
///
/// Output:
/// - `true` when the new generation is live.
///
/// Details:
/// - Progress labels are rewritten in place on stderr; the outcome message goes to stdout
///   on success and stderr on failure.
pub async fn handle_refresh(settings: &Settings) -> bool {
    let config = RefreshConfig::from_settings(settings);
    tracing::info!(url = %config.archive_url, cache = %config.cache_dir.display(), "refresh requested from CLI");
    let refresher = Refresher::new(config);
    let StartRefresh::Started(handle) = refresher.start() else {
        eprintln!("{ALREADY_RUNNING_MESSAGE}");
        return false;
    };
    let mut stderr = std::io::stderr();
    let outcome = handle
        .drive(
            |event| {
                let _ = write!(stderr, "\r\x1b[2K{}", event.label);
                let _ = stderr.flush();
            },
            |_| {
                let _ = writeln!(std::io::stderr());
            },
        )
        .await;
    if outcome.success {
        println!("{}", outcome.message);
    } else {
        eprintln!("{}", outcome.message);
    }
    outcome.success
}
