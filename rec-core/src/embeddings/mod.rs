//! Embedding Cache (C5, §4.5).
//!
//! Single-flight around a pluggable [`EmbeddingProvider`]: concurrent
//! requests for the same cache key collapse into one downstream call, the
//! rest await its result. When no provider is configured (or the configured
//! one reports itself unavailable) a deterministic fallback vector is
//! derived from the answer-option trait weights instead — reachable and
//! correct without any network call (§4.5).

pub mod fallback;

use crate::cache::CacheMetrics;
use crate::types::AnsweredQuestion;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::{instrument, warn};

/// Pluggable embedding backend, modeled on a typical hosted-embeddings API
/// client: batch is a default loop over the single-item call, so a minimal
/// implementation need only provide `embed_text`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed_text(text).await?);
        }
        Ok(out)
    }

    /// Whether this provider is currently expected to succeed. A provider
    /// reporting `false` causes the cache to skip straight to the fallback
    /// vector rather than paying for a call likely to fail.
    fn is_available(&self) -> bool {
        true
    }

    async fn warmup(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn embedding_dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

struct Entry {
    vector: Vec<f32>,
    cached_at: Instant,
}

/// Single-flight, TTL-bounded embedding cache in front of an optional
/// [`EmbeddingProvider`].
pub struct EmbeddingCache {
    provider: Option<Box<dyn EmbeddingProvider>>,
    ttl: Duration,
    entries: DashMap<u64, Entry>,
    in_flight: DashMap<u64, Arc<OnceCell<Vec<f32>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EmbeddingCache {
    #[must_use]
    pub fn new(provider: Option<Box<dyn EmbeddingProvider>>, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: 0,
            size: self.entries.len(),
            capacity: usize::MAX,
        }
    }

    /// Fetch (or compute, single-flight) the embedding for `query_text`, keyed
    /// by the fingerprint of the canonicalized answer map and domain (§4.5).
    /// Returns the vector alongside whether it was served from cache, for
    /// analytics (§4.14).
    #[instrument(skip(self, answers))]
    pub async fn get_or_compute(
        &self,
        key: u64,
        query_text: &str,
        answers: &[AnsweredQuestion],
        trait_weights: &HashMap<String, f32>,
    ) -> (Vec<f32>, bool) {
        if let Some(entry) = self.entries.get(&key) {
            if entry.cached_at.elapsed() < self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return (entry.vector.clone(), true);
            }
        }
        self.entries.remove(&key);
        self.misses.fetch_add(1, Ordering::Relaxed);

        let cell = self
            .in_flight
            .entry(key)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let vector = cell
            .get_or_init(|| self.compute(query_text, answers, trait_weights))
            .await
            .clone();

        self.in_flight.remove(&key);
        self.entries.insert(
            key,
            Entry {
                vector: vector.clone(),
                cached_at: Instant::now(),
            },
        );
        (vector, false)
    }

    async fn compute(
        &self,
        query_text: &str,
        _answers: &[AnsweredQuestion],
        trait_weights: &HashMap<String, f32>,
    ) -> Vec<f32> {
        match &self.provider {
            Some(provider) if provider.is_available() => match provider.embed_text(query_text).await {
                Ok(vector) => vector,
                Err(error) => {
                    warn!(%error, "embedding provider failed, using deterministic fallback");
                    fallback::fallback_vector(trait_weights)
                }
            },
            _ => fallback::fallback_vector(trait_weights),
        }
    }
}
