//! Generic LRU cache with per-entry TTL, generalized from the teacher's
//! episode-specific `retrieval::cache::QueryCache` (`lru.rs`) into a reusable
//! building block for the Result Cache (C7) and Enrichment Cache (C8).
//!
//! On a hit the stored value is returned bit-for-bit, with no re-derivation —
//! callers relying on stable ordering (e.g. cached candidate lists) get
//! exactly what they stored (§4.7).

use super::types::{Cached, CacheMetrics};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::Duration;

/// Thread-safe LRU+TTL cache keyed by any `Hash + Eq` key.
pub struct TtlLruCache<K, V> {
    cache: RwLock<LruCache<K, Cached<V>>>,
    metrics: RwLock<CacheMetrics>,
    default_ttl: Duration,
}

impl<K, V> TtlLruCache<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity must be nonzero");
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            metrics: RwLock::new(CacheMetrics {
                capacity: capacity.get(),
                ..Default::default()
            }),
            default_ttl,
        }
    }

    /// Fetch a live (non-expired) entry, recording hit/miss metrics.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.cache.write().expect("TtlLruCache: cache lock poisoned");
        let mut metrics = self.metrics.write().expect("TtlLruCache: metrics lock poisoned");

        match cache.get(key) {
            Some(entry) if entry.is_expired() => {
                cache.pop(key);
                metrics.misses += 1;
                metrics.evictions += 1;
                metrics.size = cache.len();
                None
            }
            Some(entry) => {
                metrics.hits += 1;
                Some(entry.value.clone())
            }
            None => {
                metrics.misses += 1;
                None
            }
        }
    }

    /// Store a value under the cache's default TTL.
    pub fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, self.default_ttl);
    }

    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let mut cache = self.cache.write().expect("TtlLruCache: cache lock poisoned");
        cache.put(
            key,
            Cached {
                value,
                cached_at: std::time::Instant::now(),
                ttl,
            },
        );
        let mut metrics = self.metrics.write().expect("TtlLruCache: metrics lock poisoned");
        metrics.size = cache.len();
    }

    pub fn invalidate(&self, key: &K) {
        let mut cache = self.cache.write().expect("TtlLruCache: cache lock poisoned");
        if cache.pop(key).is_some() {
            let mut metrics = self.metrics.write().expect("TtlLruCache: metrics lock poisoned");
            metrics.size = cache.len();
        }
    }

    pub fn invalidate_all(&self) {
        let mut cache = self.cache.write().expect("TtlLruCache: cache lock poisoned");
        cache.clear();
        let mut metrics = self.metrics.write().expect("TtlLruCache: metrics lock poisoned");
        metrics.size = 0;
    }

    #[must_use]
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.read().expect("TtlLruCache: metrics lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[test]
    fn hit_then_miss_after_invalidate() {
        let cache: TtlLruCache<u64, Vec<i32>> = TtlLruCache::new(10, StdDuration::from_secs(60));
        cache.put(1, vec![1, 2, 3]);
        assert_eq!(cache.get(&1), Some(vec![1, 2, 3]));
        cache.invalidate(&1);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn expired_entries_are_treated_as_misses() {
        let cache: TtlLruCache<u64, i32> = TtlLruCache::new(10, StdDuration::from_millis(1));
        cache.put(1, 42);
        std::thread::sleep(StdDuration::from_millis(10));
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn hit_preserves_value_bit_for_bit() {
        let cache: TtlLruCache<u64, Vec<i32>> = TtlLruCache::new(10, StdDuration::from_secs(60));
        let original = vec![5, 3, 9, 1];
        cache.put(7, original.clone());
        assert_eq!(cache.get(&7), Some(original));
    }
}
