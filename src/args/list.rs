//! Command-line listing of available languages and platforms.

use brief::search::SearchEngine;
use brief::settings::Settings;

/// What: Print every language in the active cache.
///
/// Output:
/// - `true`; an empty cache prints nothing.
///
/// Details:
/// - One `code<TAB>name` line per language, marked with `*` when enabled.
#[must_use]
pub fn handle_languages(settings: &Settings) -> bool {
    let catalog = super::utils::open_catalog(settings, SearchEngine::default());
    let prefs = catalog.preferences();
    let languages = catalog.languages();
    tracing::info!(count = languages.len(), "listing languages");
    for entry in languages {
        let mark = if prefs.language_enabled(&entry.code) { '*' } else { ' ' };
        println!("{mark} {}\t{}", entry.code, entry.display_name);
    }
    true
}

/// Print every platform in the active cache, same layout as `handle_languages`.
#[must_use]
pub fn handle_platforms(settings: &Settings) -> bool {
    let catalog = super::utils::open_catalog(settings, SearchEngine::default());
    let prefs = catalog.preferences();
    let platforms = catalog.platforms();
    tracing::info!(count = platforms.len(), "listing platforms");
    for entry in platforms {
        let mark = if prefs.platform_enabled(&entry.code) { '*' } else { ' ' };
        println!("{mark} {}\t{}", entry.code, entry.display_name);
    }
    true
}
