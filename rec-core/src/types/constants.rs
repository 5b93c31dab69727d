//! Shared numeric constants for the data model (§3) and components (§4).

use std::time::Duration;

/// Default session TTL (§4.3): one hour.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Default question-catalog warm-cache TTL (§4.1): one hour.
pub const DEFAULT_CATALOG_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Default embedding-cache TTL (§4.5): 24 hours.
pub const DEFAULT_EMBEDDING_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default result-cache TTL (§4.7): one hour.
pub const DEFAULT_RESULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Default enrichment-cache TTL (§4.8): 24 hours.
pub const DEFAULT_ENRICHMENT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Width of embedding vectors (§4.5).
pub const EMBEDDING_DIMENSION: usize = 1536;

/// Default top-K candidates to retrieve (§4.6).
pub const DEFAULT_TOP_K: usize = 20;

/// Maximum top-K candidates allowed (§4.6).
pub const MAX_TOP_K: usize = 50;

/// Maximum recommendation list length returned to a client (§3).
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Retrieval stage deadline (§4.13).
pub const RETRIEVAL_DEADLINE: Duration = Duration::from_secs(2);

/// Embedding stage deadline (§4.13).
pub const EMBEDDING_DEADLINE: Duration = Duration::from_secs(3);

/// Per-item enrichment deadline (§4.13).
pub const ENRICHMENT_DEADLINE_PER_ITEM: Duration = Duration::from_millis(1500);

/// Maximum concurrent enrichment calls (§4.13, §5).
pub const ENRICHMENT_CONCURRENCY: usize = 8;

/// Total request budget across the whole pipeline (§4.13).
pub const TOTAL_REQUEST_BUDGET: Duration = Duration::from_secs(8);

/// Serendipity factor applied when `discovery_mode=surprise` (§9 Open Question,
/// resolved to the midpoint of the observed 0.05-0.15 range).
pub const SERENDIPITY_FACTOR: f32 = 0.1;

/// Strategic-mix insertion ranks, 1-based (§4.9).
pub const STRATEGIC_MIX_RANKS: [usize; 3] = [3, 6, 8];
