//! Duplicate detection across the live jokes and the moderation queue.

use super::normalize::normalize;
use super::similarity::similarity;

/// Similarity above this value (exclusive) marks a near-duplicate.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.90;

/// Decides whether `candidate` already exists among the active jokes or the
/// pending submissions.
///
/// All contents are normalized for comparison. Exact normalized equality
/// short-circuits; otherwise any pairwise similarity strictly greater than
/// `threshold` counts as a duplicate. A pair scoring exactly at the threshold
/// is allowed through.
pub fn is_duplicate<'a, I, J>(
    candidate: &str,
    active_jokes: I,
    pending_submissions: J,
    threshold: f64,
) -> bool
where
    I: IntoIterator<Item = &'a str>,
    J: IntoIterator<Item = &'a str>,
{
    let candidate = normalize(candidate);
    let existing: Vec<String> = active_jokes
        .into_iter()
        .chain(pending_submissions)
        .map(normalize)
        .collect();

    // Exact matches are the common, cheap case.
    if existing.iter().any(|e| *e == candidate) {
        return true;
    }

    existing
        .iter()
        .any(|e| similarity(&candidate, e) > threshold)
}
