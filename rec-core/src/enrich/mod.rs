//! Enricher (C8, §4.8).
//!
//! `Enrich([]Candidate) -> []RecommendationItem`, best-effort: a failed
//! per-item catalog call never drops the candidate, it just leaves the
//! enrichment fields at their missing-value sentinel.

pub mod mapping;

pub use mapping::CatalogDetail;

use crate::cache::TtlLruCache;
use crate::types::{Candidate, RecommendationItem};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

/// The external catalog-detail collaborator (§4.8).
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_detail(&self, candidate_id: &str) -> anyhow::Result<CatalogDetail>;
}

/// Wraps a [`CatalogProvider`] with a per-item TTL cache and bounded
/// concurrent fan-out (§4.8, §5). Holds an owned `Arc` so the Orchestrator
/// can keep one enricher (and its warm cache) alive for the life of the
/// process instead of rebuilding it per request.
pub struct Enricher {
    provider: Arc<dyn CatalogProvider>,
    cache: TtlLruCache<String, CatalogDetail>,
    concurrency: usize,
    image_base_url: String,
}

impl Enricher {
    #[must_use]
    pub fn new(provider: Arc<dyn CatalogProvider>, cache_capacity: usize, ttl: Duration, concurrency: usize, image_base_url: String) -> Self {
        Self {
            provider,
            cache: TtlLruCache::new(cache_capacity, ttl),
            concurrency,
            image_base_url,
        }
    }

    #[instrument(skip(self, candidates))]
    pub async fn enrich(&self, candidates: Vec<Candidate>) -> Vec<RecommendationItem> {
        stream::iter(candidates)
            .map(|candidate| async move {
                let detail = self.detail_for(&candidate.id).await;
                mapping::apply(candidate, detail, &self.image_base_url)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }

    async fn detail_for(&self, candidate_id: &str) -> Option<CatalogDetail> {
        if let Some(cached) = self.cache.get(&candidate_id.to_string()) {
            return Some(cached);
        }
        match self.provider.fetch_detail(candidate_id).await {
            Ok(detail) => {
                self.cache.put(candidate_id.to_string(), detail.clone());
                Some(detail)
            }
            Err(error) => {
                warn!(candidate_id, %error, "catalog enrichment failed, returning known fields only");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl CatalogProvider for FailingProvider {
        async fn fetch_detail(&self, _candidate_id: &str) -> anyhow::Result<CatalogDetail> {
            anyhow::bail!("catalog down")
        }
    }

    struct WorkingProvider;

    #[async_trait]
    impl CatalogProvider for WorkingProvider {
        async fn fetch_detail(&self, candidate_id: &str) -> anyhow::Result<CatalogDetail> {
            Ok(CatalogDetail {
                poster_path: Some(format!("/{candidate_id}.jpg")),
                ..Default::default()
            })
        }
    }

    fn candidate(id: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: id.to_string(),
            release_year: 2000,
            genres: vec![],
            quality_score: 0.8,
            popularity: 1.0,
            vote_count: 10,
            runtime_minutes: 100,
            similarity: 0.9,
        }
    }

    #[tokio::test]
    async fn failed_enrichment_still_returns_the_item() {
        let enricher = Enricher::new(Arc::new(FailingProvider), 10, Duration::from_secs(60), 4, "https://img/".to_string());
        let items = enricher.enrich(vec![candidate("1")]).await;
        assert_eq!(items.len(), 1);
        assert!(items[0].poster_url.is_none());
    }

    #[tokio::test]
    async fn successful_enrichment_fills_fields() {
        let enricher = Enricher::new(Arc::new(WorkingProvider), 10, Duration::from_secs(60), 4, "https://img".to_string());
        let items = enricher.enrich(vec![candidate("1")]).await;
        assert_eq!(items[0].poster_url.as_deref(), Some("https://img/1.jpg"));
    }
}
