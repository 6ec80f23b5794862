//! Shared utilities for argument processing.

use brief::catalog::Catalog;
use brief::pages::PageStore;
use brief::search::SearchEngine;
use brief::settings::Settings;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level`.
/// - `BRIEF_TRACE=1` enables TRACE level.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("BRIEF_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// Page store over the configured system tree and the default user cache.
#[must_use]
pub fn page_store(settings: &Settings) -> PageStore {
    let user_root = brief::paths::user_generation_dir(&brief::paths::cache_dir());
    PageStore::new(settings.system_data_dir.clone(), user_root)
}

/// What: Open a catalog for one-shot CLI use.
///
/// Inputs:
/// - `settings`: Loaded settings.
/// - `engine`: Search engine to rank with.
///
/// Output:
/// - Catalog over the active generation, filtered by the configured preferences.
#[must_use]
pub fn open_catalog(settings: &Settings, engine: SearchEngine) -> Catalog {
    let store = page_store(settings);
    tracing::debug!(
        generation = ?store.active_generation(),
        root = %store.active_root().display(),
        "opening catalog"
    );
    Catalog::open(store, settings.preferences.clone(), engine)
}
