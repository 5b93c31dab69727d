//! Retrieval Client (C6, §4.6).
//!
//! Two index-query modes sharing one retry/deadline policy; when the index
//! reports itself unavailable the Orchestrator is expected to fall back to
//! [`catalog_fallback`], a pure local sort requiring no network access.

mod catalog_fallback;

pub use catalog_fallback::catalog_fallback;

use crate::error::{Error, Result};
use crate::retry::{RetryConfig, RetryPolicy};
use crate::types::{Candidate, FilterPredicate};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Either a text query (embed + search server-side) or a pre-computed vector
/// (§4.6: "text mode" / "vector mode").
pub enum RetrievalQuery<'a> {
    Text(&'a str),
    Vector(&'a [f32]),
}

/// The external vector-index collaborator (§4.6).
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn search(
        &self,
        query: RetrievalQuery<'_>,
        filters: &FilterPredicate,
        top_k: usize,
    ) -> anyhow::Result<Vec<Candidate>>;
}

/// Wraps a [`VectorIndex`] with the single retry + jittered backoff named in
/// §4.6, translating any second failure into [`Error::Unavailable`]. Holds an
/// owned `Arc` so the Orchestrator can keep one client alive for the life of
/// the process.
pub struct RetrievalClient {
    index: Arc<dyn VectorIndex>,
}

impl RetrievalClient {
    #[must_use]
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }

    #[instrument(skip(self, query, filters))]
    pub async fn search(
        &self,
        query: RetrievalQuery<'_>,
        filters: &FilterPredicate,
        top_k: usize,
    ) -> Result<Vec<Candidate>> {
        let top_k = top_k.min(crate::types::constants::MAX_TOP_K);
        let mut policy = RetryPolicy::with_config(RetryConfig::new().with_max_retries(1));

        policy
            .execute(|| async {
                self.index
                    .search(clone_query(&query), filters, top_k)
                    .await
                    .map_err(|error| Error::Unavailable(error.to_string()))
            })
            .await
    }
}

/// [`RetrievalQuery`] intentionally isn't `Clone` (it may borrow a caller's
/// vector); the retry loop only ever needs to re-issue the same borrowed
/// query, so this rebuilds an equivalent value from the same borrow.
fn clone_query<'a>(query: &RetrievalQuery<'a>) -> RetrievalQuery<'a> {
    match query {
        RetrievalQuery::Text(text) => RetrievalQuery::Text(text),
        RetrievalQuery::Vector(vector) => RetrievalQuery::Vector(vector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyIndex {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VectorIndex for FlakyIndex {
        async fn search(
            &self,
            _query: RetrievalQuery<'_>,
            _filters: &FilterPredicate,
            _top_k: usize,
        ) -> anyhow::Result<Vec<Candidate>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                anyhow::bail!("transient network error")
            }
            Ok(vec![])
        }
    }

    struct AlwaysFailingIndex;

    #[async_trait]
    impl VectorIndex for AlwaysFailingIndex {
        async fn search(
            &self,
            _query: RetrievalQuery<'_>,
            _filters: &FilterPredicate,
            _top_k: usize,
        ) -> anyhow::Result<Vec<Candidate>> {
            anyhow::bail!("index down")
        }
    }

    #[tokio::test]
    async fn recovers_after_single_retry() {
        let index = Arc::new(FlakyIndex { calls: AtomicUsize::new(0) });
        let client = RetrievalClient::new(index);
        let result = client
            .search(RetrievalQuery::Text("cozy"), &FilterPredicate::default(), 20)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn second_failure_reports_unavailable() {
        let index = Arc::new(AlwaysFailingIndex);
        let client = RetrievalClient::new(index);
        let result = client
            .search(RetrievalQuery::Text("cozy"), &FilterPredicate::default(), 20)
            .await;
        assert!(matches!(result, Err(Error::Unavailable(_))));
    }
}
