//! Question Catalog (C1, §4.1).
//!
//! Source of truth is a persistent store, consulted through a warm cache
//! (TTL <= 1h). A built-in fallback always exists; an empty question list is
//! treated as a fatal error rather than ever surfaced to a caller.

pub mod builtin;

use crate::cache::TtlLruCache;
use crate::error::{Error, Result};
use crate::types::{Domain, Question};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{instrument, warn};

/// Pluggable persistent-store backend for the catalog. A real implementation
/// might read from a database; `rec-storage-redb` provides one.
#[async_trait]
pub trait QuestionCatalogBackend: Send + Sync {
    async fn load_questions(&self, domain: Domain) -> anyhow::Result<Vec<Question>>;
}

/// Public contract: `GetQuestions(domain) -> []Question` (§4.1).
#[async_trait]
pub trait QuestionCatalog: Send + Sync {
    async fn get_questions(&self, domain: Domain) -> Result<Vec<Question>>;
}

/// Warm-cache-in-front-of-backend catalog, falling back to the built-in set
/// whenever the backend is absent or errors.
pub struct CachedCatalog {
    backend: Option<Box<dyn QuestionCatalogBackend>>,
    cache: TtlLruCache<Domain, Vec<Question>>,
}

impl CachedCatalog {
    #[must_use]
    pub fn new(backend: Option<Box<dyn QuestionCatalogBackend>>, ttl: Duration) -> Self {
        Self {
            backend,
            cache: TtlLruCache::new(16, ttl),
        }
    }

    /// Construct a catalog with no backend at all: builtin-only, always
    /// available without any I/O.
    #[must_use]
    pub fn builtin_only(ttl: Duration) -> Self {
        Self::new(None, ttl)
    }
}

#[async_trait]
impl QuestionCatalog for CachedCatalog {
    #[instrument(skip(self))]
    async fn get_questions(&self, domain: Domain) -> Result<Vec<Question>> {
        if let Some(cached) = self.cache.get(&domain) {
            return Ok(cached);
        }

        let questions = match &self.backend {
            Some(backend) => match backend.load_questions(domain).await {
                Ok(questions) if !questions.is_empty() => questions,
                Ok(_) => {
                    warn!(?domain, "catalog backend returned an empty set, using builtin fallback");
                    builtin::builtin_questions(domain)
                }
                Err(error) => {
                    warn!(?domain, %error, "catalog backend unavailable, using builtin fallback");
                    builtin::builtin_questions(domain)
                }
            },
            None => builtin::builtin_questions(domain),
        };

        if questions.is_empty() {
            // The builtin set is guaranteed non-empty (see builtin module
            // tests); reaching this means a programming error, not a runtime
            // condition a caller should retry.
            return Err(Error::Internal(format!(
                "question catalog produced an empty set for domain {domain:?}"
            )));
        }

        self.cache.put(domain, questions.clone());
        Ok(questions)
    }
}
