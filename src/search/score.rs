//! Fuzzy similarity between a command name and a query.

use strsim::generic_damerau_levenshtein;

/// Upper bound of every score (a 0–100 % similarity scaled for integer comparison).
pub const SCORE_SCALE: u32 = 10_000;
/// Weight applied to best-window matches so an exact full match always ranks first.
const PARTIAL_WEIGHT: f64 = 0.9;

/// What: Normalise text for matching.
///
/// Output:
/// - Lowercase string with whitespace and punctuation removed (`Git-LFS` → `gitlfs`).
#[must_use]
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity of two equal-role char slices in `0.0..=1.0`.
fn similarity(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    let dist = generic_damerau_levenshtein(a, b);
    #[allow(clippy::cast_precision_loss)]
    let ratio = 1.0 - dist as f64 / longest as f64;
    ratio.max(0.0)
}

/// Best similarity of `short` against any same-length window of `long`.
fn best_window(short: &[char], long: &[char]) -> f64 {
    if short.is_empty() || short.len() >= long.len() {
        return 0.0;
    }
    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        best = best.max(similarity(short, window));
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// What: Score how well `name` matches `query`.
///
/// Inputs:
/// - `name`: Command name.
/// - `query`: Raw query text.
///
/// Output:
/// - Integer in `0..=SCORE_SCALE`; `SCORE_SCALE` means identical after normalisation.
///
/// Details:
/// - Both sides are normalised first.
/// - Full-string similarity is normalised Damerau–Levenshtein, so a single transposition
///   (`gti` vs `git`) costs one edit.
/// - A partial match (best window of the shorter string inside the longer) is weighted by
///   0.9 and the larger of the two wins, which keeps prefix/infix hits (`git` in `git-lfs`)
///   above the inclusion threshold.
/// - When the name is the shorter side, the partial weight is further scaled by
///   `name.len() / query.len()`, so a tiny name inside a long query (`od` in `podman`)
///   does not tie with real prefix hits.
/// - Pure function of its inputs: repeated calls return identical values.
#[must_use]
pub fn fuzzy_score(name: &str, query: &str) -> u32 {
    let name: Vec<char> = normalize(name).chars().collect();
    let query: Vec<char> = normalize(query).chars().collect();
    if query.is_empty() {
        return SCORE_SCALE;
    }
    if name.is_empty() {
        return 0;
    }
    let full = similarity(&name, &query);
    #[allow(clippy::cast_precision_loss)]
    let partial = if query.len() < name.len() {
        best_window(&query, &name) * PARTIAL_WEIGHT
    } else {
        let coverage = name.len() as f64 / query.len() as f64;
        best_window(&name, &query) * PARTIAL_WEIGHT * coverage
    };
    let best = full.max(partial).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = (best * f64::from(SCORE_SCALE)).round() as u32;
    scaled.min(SCORE_SCALE)
}
