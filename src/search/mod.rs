//! Search engine: fuzzy filtering and ranking of command items.
//!
//! Items are plain values rebuilt from the command index; the engine scores them against
//! a query through a bounded memo and returns a freshly ranked list.

use std::cmp::Ordering;

mod memo;
mod score;

pub use memo::{DEFAULT_MEMO_CAPACITY, ScoreMemo};
pub use score::{SCORE_SCALE, fuzzy_score, normalize};

/// Minimum score for an item to be shown when a query is present (30 %).
pub const DEFAULT_MIN_SCORE: u32 = 3_000;

/// What: One searchable command entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommandItem {
    /// Command name (page file stem).
    pub name: String,
    /// Platform directory code.
    pub platform: String,
    /// Language code.
    pub language: String,
}

impl CommandItem {
    /// Ordering by name, then platform, then language.
    #[must_use]
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        a.name
            .cmp(&b.name)
            .then_with(|| a.platform.cmp(&b.platform))
            .then_with(|| a.language.cmp(&b.language))
    }
}

/// A command item with its score for the current query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredItem {
    /// The matched item.
    pub item: CommandItem,
    /// Score in `0..=SCORE_SCALE`; `SCORE_SCALE` for every item when no query is set.
    pub score: u32,
}

/// What: Stateful scorer with memoization and an inclusion threshold.
#[derive(Debug)]
pub struct SearchEngine {
    /// Memoized pair scores.
    memo: ScoreMemo,
    /// Threshold used by `search`.
    min_score: u32,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE, DEFAULT_MEMO_CAPACITY)
    }
}

impl SearchEngine {
    /// Create an engine with a custom threshold and memo capacity.
    #[must_use]
    pub fn new(min_score: u32, memo_capacity: usize) -> Self {
        Self {
            memo: ScoreMemo::with_capacity(memo_capacity),
            min_score: min_score.min(SCORE_SCALE),
        }
    }

    /// Threshold used by [`SearchEngine::search`].
    #[must_use]
    pub const fn min_score(&self) -> u32 {
        self.min_score
    }

    /// Memoized score of `name` against `query`.
    pub fn score(&mut self, name: &str, query: &str) -> u32 {
        self.memo.score(name, query)
    }

    /// Read access to the memo (for diagnostics).
    #[must_use]
    pub const fn memo(&self) -> &ScoreMemo {
        &self.memo
    }

    /// Filter and rank with the engine's default threshold.
    pub fn search(&mut self, items: &[CommandItem], query: &str) -> Vec<ScoredItem> {
        let min = self.min_score;
        self.search_with_threshold(items, query, min)
    }

    /// What: Filter and rank `items` against `query`.
    ///
    /// Inputs:
    /// - `items`: Full item set.
    /// - `query`: Raw query text.
    /// - `min_score`: Inclusion threshold in `0..=SCORE_SCALE`.
    ///
    /// Output:
    /// - Items scoring at least `min_score`, ordered by descending score, then ascending
    ///   name (platform and language break remaining ties).
    ///
    /// Details:
    /// - A query that normalises to nothing means "no query": every item passes, in name
    ///   order.
    pub fn search_with_threshold(
        &mut self,
        items: &[CommandItem],
        query: &str,
        min_score: u32,
    ) -> Vec<ScoredItem> {
        if normalize(query).is_empty() {
            let mut all: Vec<ScoredItem> = items
                .iter()
                .map(|item| ScoredItem {
                    item: item.clone(),
                    score: SCORE_SCALE,
                })
                .collect();
            all.sort_by(|a, b| CommandItem::display_order(&a.item, &b.item));
            return all;
        }
        let mut out: Vec<ScoredItem> = Vec::new();
        for item in items {
            let score = self.memo.score(&item.name, query);
            if score >= min_score {
                out.push(ScoredItem {
                    item: item.clone(),
                    score,
                });
            }
        }
        out.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| CommandItem::display_order(&a.item, &b.item))
        });
        tracing::trace!(
            query,
            candidates = items.len(),
            matches = out.len(),
            "search ranked"
        );
        out
    }
}

/// What: Current ranked view over an item set and a query.
///
/// Details:
/// - Changing the items or the query invalidates the cached view; the next
///   `results()` recomputes it. The score memo survives invalidation.
#[derive(Debug, Default)]
pub struct SearchView {
    /// Scoring engine shared across recomputations.
    engine: SearchEngine,
    /// Current item set.
    items: Vec<CommandItem>,
    /// Current query text.
    query: String,
    /// Cached ranked view, `None` when stale.
    results: Option<Vec<ScoredItem>>,
}

impl SearchView {
    /// Create an empty view backed by `engine`.
    #[must_use]
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine,
            items: Vec::new(),
            query: String::new(),
            results: None,
        }
    }

    /// Replace the item set wholesale.
    pub fn set_items(&mut self, items: Vec<CommandItem>) {
        self.items = items;
        self.results = None;
    }

    /// Update the query; a no-op when unchanged.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.results = None;
        }
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current item set.
    #[must_use]
    pub fn items(&self) -> &[CommandItem] {
        &self.items
    }

    /// Whether the next `results()` call will recompute.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.results.is_none()
    }

    /// Ranked results for the current items and query.
    pub fn results(&mut self) -> &[ScoredItem] {
        let Self {
            engine,
            items,
            query,
            results,
        } = self;
        results.get_or_insert_with(|| engine.search(items, query))
    }

    /// First result, as activated by pressing enter in the search box.
    pub fn first(&mut self) -> Option<&CommandItem> {
        self.results().first().map(|s| &s.item)
    }

    /// Scoring engine (for diagnostics).
    #[must_use]
    pub const fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> CommandItem {
        CommandItem {
            name: name.to_string(),
            platform: "common".to_string(),
            language: "en".to_string(),
        }
    }

    fn names(res: &[ScoredItem]) -> Vec<&str> {
        res.iter().map(|s| s.item.name.as_str()).collect()
    }

    #[test]
    /// What: Exact match ranks first; equal scores fall back to name order.
    ///
    /// Inputs:
    /// - Items `gitk`, `git-lfs`, `git`; query `git`.
    ///
    /// Output:
    /// - `git`, then `git-lfs` and `gitk` (tied) alphabetically.
    fn exact_match_ranks_first_then_alphabetical() {
        let mut engine = SearchEngine::default();
        let items = vec![item("gitk"), item("git-lfs"), item("git")];
        let res = engine.search(&items, "git");
        assert_eq!(names(&res), vec!["git", "git-lfs", "gitk"]);
        assert_eq!(res[0].score, SCORE_SCALE);
        assert_eq!(res[1].score, res[2].score);
    }

    #[test]
    /// What: Threshold includes transpositions and excludes unrelated names.
    fn threshold_filters() {
        let mut engine = SearchEngine::default();
        let items = vec![item("git")];
        assert_eq!(names(&engine.search(&items, "gti")), vec!["git"]);
        assert!(engine.search(&items, "xyz123").is_empty());
        assert!(engine.score("git", "gti") > DEFAULT_MIN_SCORE);
        assert!(engine.score("git", "xyz123") < DEFAULT_MIN_SCORE);
    }

    #[test]
    /// What: Blank or punctuation-only queries return every item in name order.
    fn empty_query_returns_all_sorted() {
        let mut engine = SearchEngine::default();
        let items = vec![item("tar"), item("ls"), item("git")];
        assert_eq!(names(&engine.search(&items, "")), vec!["git", "ls", "tar"]);
        assert_eq!(names(&engine.search(&items, " - ")), vec!["git", "ls", "tar"]);
        assert_eq!(engine.memo().len(), 0);
    }

    #[test]
    /// What: Explicit thresholds override the default.
    fn custom_threshold() {
        let mut engine = SearchEngine::default();
        let items = vec![item("git"), item("gitk")];
        let res = engine.search_with_threshold(&items, "git", SCORE_SCALE);
        assert_eq!(names(&res), vec!["git"]);
        assert_eq!(engine.search_with_threshold(&items, "git", 0).len(), 2);
    }

    #[test]
    /// What: The view recomputes only after invalidation and keeps its memo.
    ///
    /// Inputs:
    /// - Set items and query, read results twice, then change query and items.
    ///
    /// Output:
    /// - Staleness toggles as expected and results follow the latest inputs.
    fn view_invalidation() {
        let mut view = SearchView::default();
        view.set_items(vec![item("git"), item("tar")]);
        view.set_query("tar");
        assert!(view.is_stale());
        assert_eq!(names(view.results()), vec!["tar"]);
        assert!(!view.is_stale());

        view.set_query("tar");
        assert!(!view.is_stale());

        view.set_query("");
        assert!(view.is_stale());
        assert_eq!(names(view.results()), vec!["git", "tar"]);

        view.set_items(vec![item("ls")]);
        assert!(view.is_stale());
        assert_eq!(view.first().map(|i| i.name.clone()), Some("ls".to_string()));
        assert!(view.engine().memo().len() >= 2);
    }
}
