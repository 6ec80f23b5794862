//! Command-line fuzzy search.

use brief::search::{DEFAULT_MEMO_CAPACITY, DEFAULT_MIN_SCORE, SearchEngine};
use brief::settings::Settings;

/// What: Rank enabled commands against `query` and print the best matches.
///
/// Inputs:
/// - `query`: Free-form query.
/// - `limit`: Maximum number of lines printed.
/// - `min_score`: Threshold override; defaults to the engine threshold.
///
/// Output:
/// - `true` when at least one command matched.
///
/// Details:
/// - Lines are `score<TAB>name<TAB>platform<TAB>language`, best first.
#[must_use]
pub fn handle_search(
    settings: &Settings,
    query: &str,
    limit: usize,
    min_score: Option<u32>,
) -> bool {
    let engine = SearchEngine::new(
        min_score.unwrap_or(DEFAULT_MIN_SCORE),
        DEFAULT_MEMO_CAPACITY,
    );
    let mut catalog = super::utils::open_catalog(settings, engine);
    let results = catalog.search(query);
    tracing::info!(query, matches = results.len(), "search completed");
    if results.is_empty() {
        eprintln!("No commands match '{query}'");
        return false;
    }
    for scored in results.iter().take(limit) {
        println!(
            "{}\t{}\t{}\t{}",
            scored.score, scored.item.name, scored.item.platform, scored.item.language
        );
    }
    true
}
