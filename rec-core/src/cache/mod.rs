//! Result Cache (C7): caches retrieval results keyed by Query Key (§3, §4.7).
//!
//! The underlying [`TtlLruCache`] is a generic building block also reused by
//! the Question Catalog's warm cache (C1) and the Enrichment Cache (C8).

mod ttl_lru;
mod types;

pub use types::CacheMetrics;
pub use ttl_lru::TtlLruCache;

use crate::types::{Candidate, QueryKey};
use std::time::Duration;

/// The Result Cache: Query Key -> ordered Candidate list, TTL <= 1 hour (§4.7).
pub struct ResultCache {
    inner: TtlLruCache<QueryKey, Vec<Candidate>>,
}

impl ResultCache {
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: TtlLruCache::new(capacity, ttl),
        }
    }

    /// Stored order is preserved bit-for-bit on a hit; no re-ranking (§4.7).
    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<Vec<Candidate>> {
        self.inner.get(key)
    }

    /// Writes happen only after a successful retrieval (§4.7); callers must
    /// not call this on a failed or fallback path.
    pub fn put(&self, key: QueryKey, candidates: Vec<Candidate>) {
        self.inner.put(key, candidates);
    }

    #[must_use]
    pub fn metrics(&self) -> CacheMetrics {
        self.inner.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FilterPredicate;
    use std::time::Duration as StdDuration;

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: id.to_string(),
            release_year: 2000,
            genres: vec![],
            quality_score: 0.5,
            popularity: 0.5,
            vote_count: 10,
            runtime_minutes: 100,
            similarity: 0.9,
        }
    }

    #[test]
    fn hit_preserves_order() {
        let cache = ResultCache::new(10, StdDuration::from_secs(60));
        let key = QueryKey::new("a cozy night in", &FilterPredicate::default());
        let ordered = vec![candidate("c"), candidate("a"), candidate("b")];
        cache.put(key, ordered.clone());
        assert_eq!(cache.get(&key), Some(ordered));
    }
}
