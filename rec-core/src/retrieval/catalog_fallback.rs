//! Catalog-backed fallback retrieval (§4.6, §4.8, §4.13): a plain local sort
//! used when the vector index reports itself unavailable. No I/O, so it
//! always completes.

use crate::types::{Candidate, FilterPredicate};
use std::cmp::Ordering;

/// Filter `pool` by `filters`, then order by quality descending, vote count
/// descending, truncated to `top_k`. Similarity is synthesized at a flat,
/// low-confidence value since no real similarity score exists on this path.
#[must_use]
pub fn catalog_fallback(pool: &[Candidate], filters: &FilterPredicate, top_k: usize) -> Vec<Candidate> {
    let mut matched: Vec<Candidate> = pool
        .iter()
        .filter(|c| filters.matches(c))
        .cloned()
        .map(|mut c| {
            c.similarity = 0.5;
            c
        })
        .collect();

    matched.sort_by(|a, b| {
        b.quality_score
            .partial_cmp(&a.quality_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.vote_count.cmp(&a.vote_count))
    });
    matched.truncate(top_k);
    matched
}
