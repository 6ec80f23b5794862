//! Bounded memo of fuzzy scores keyed by `(name, query)`.

use std::num::NonZeroUsize;

use lru::LruCache;

use super::score::fuzzy_score;

/// Default number of memoized pairs.
pub const DEFAULT_MEMO_CAPACITY: usize = 30_000;

/// What: LRU cache in front of `fuzzy_score`.
///
/// Details:
/// - Keys are the exact `(name, query)` pair as given, before normalisation.
/// - Eviction only drops cached values; a recomputed score is identical because the
///   scoring function is pure.
#[derive(Debug)]
pub struct ScoreMemo {
    /// Cached scores, most recently used first.
    lru: LruCache<(String, String), u32>,
    /// Number of lookups answered from the cache.
    hits: u64,
    /// Number of lookups that had to compute a score.
    misses: u64,
}

impl Default for ScoreMemo {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMO_CAPACITY)
    }
}

impl ScoreMemo {
    /// Create a memo holding at most `capacity` pairs (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lru: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            misses: 0,
        }
    }

    /// Score `name` against `query`, computing and caching on a miss.
    pub fn score(&mut self, name: &str, query: &str) -> u32 {
        let key = (name.to_string(), query.to_string());
        if let Some(score) = self.lru.get(&key) {
            self.hits += 1;
            return *score;
        }
        self.misses += 1;
        let score = fuzzy_score(name, query);
        self.lru.put(key, score);
        score
    }

    /// Number of cached pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    /// Whether the memo is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    /// `(hits, misses)` since creation.
    #[must_use]
    pub const fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
