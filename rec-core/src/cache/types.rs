//! Shared cache value wrapper and metrics, generalized from the query-cache
//! design in the teacher's `retrieval/cache` module.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A cached value with its own expiration clock.
#[derive(Debug, Clone)]
pub(crate) struct Cached<V> {
    pub value: V,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl<V> Cached<V> {
    pub(crate) fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// Cache metrics for monitoring (§4.7, §4.8 caches expose these for
/// analytics/observability).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
    pub capacity: usize,
}

impl CacheMetrics {
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
