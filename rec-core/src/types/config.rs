//! Immutable startup configuration (§9 Design Notes: "dynamic env bag" is
//! replaced by a typed configuration struct injected once at startup).

use super::constants::*;
use std::time::Duration;

/// Session Store configuration (§4.3).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL,
        }
    }
}

/// Cache configuration shared by C1/C5/C7/C8.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub catalog_ttl: Duration,
    pub embedding_ttl: Duration,
    pub result_ttl: Duration,
    pub enrichment_ttl: Duration,
    pub result_cache_capacity: usize,
    pub enrichment_cache_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            catalog_ttl: DEFAULT_CATALOG_CACHE_TTL,
            embedding_ttl: DEFAULT_EMBEDDING_CACHE_TTL,
            result_ttl: DEFAULT_RESULT_CACHE_TTL,
            enrichment_ttl: DEFAULT_ENRICHMENT_CACHE_TTL,
            result_cache_capacity: 10_000,
            enrichment_cache_capacity: 10_000,
        }
    }
}

/// Retrieval/orchestration timing configuration (§4.6, §4.13).
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
    pub max_top_k: usize,
    pub retrieval_deadline: Duration,
    pub embedding_deadline: Duration,
    pub enrichment_deadline_per_item: Duration,
    pub enrichment_concurrency: usize,
    pub total_request_budget: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: DEFAULT_TOP_K,
            max_top_k: MAX_TOP_K,
            retrieval_deadline: RETRIEVAL_DEADLINE,
            embedding_deadline: EMBEDDING_DEADLINE,
            enrichment_deadline_per_item: ENRICHMENT_DEADLINE_PER_ITEM,
            enrichment_concurrency: ENRICHMENT_CONCURRENCY,
            total_request_budget: TOTAL_REQUEST_BUDGET,
        }
    }
}

/// Surprise Engine tuning (§4.9, §9 Open Question resolution).
#[derive(Debug, Clone)]
pub struct SurpriseConfig {
    pub serendipity_factor: f32,
}

impl Default for SurpriseConfig {
    fn default() -> Self {
        Self {
            serendipity_factor: SERENDIPITY_FACTOR,
        }
    }
}

/// Analytics Writer worker-pool configuration (§4.13 step 10, §9).
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub worker_count: usize,
    pub max_queue_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            worker_count: 2,
            max_queue_size: 1_000,
        }
    }
}

/// Top-level, process-wide immutable configuration. Constructed once at
/// startup and shared via `Arc` — never mutated afterward (§9).
#[derive(Debug, Clone, Default)]
pub struct RecommenderConfig {
    pub session: SessionConfig,
    pub cache: CacheConfig,
    pub retrieval: RetrievalConfig,
    pub surprise: SurpriseConfig,
    pub analytics: AnalyticsConfig,
}
