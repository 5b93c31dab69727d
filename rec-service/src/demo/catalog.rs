//! The fixed, in-memory candidate pool (§4.6, §4.8, §4.13 step 5): never
//! empty, reachable without I/O, same shape as the catalog crate's built-in
//! question set.

use async_trait::async_trait;
use rec_core::enrich::{CatalogDetail, CatalogProvider};
use rec_core::orchestrator::CatalogPool;
use rec_core::retrieval::{RetrievalQuery, VectorIndex};
use rec_core::types::{Candidate, Domain, FilterPredicate};
use std::collections::HashMap;

fn candidate(id: &str, title: &str, year: u16, genres: &[&str], quality: f32, popularity: f32, votes: u32, runtime: u16) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        release_year: year,
        genres: genres.iter().map(|g| (*g).to_string()).collect(),
        quality_score: quality,
        popularity,
        vote_count: votes,
        runtime_minutes: runtime,
        similarity: 0.0,
    }
}

fn movies() -> Vec<Candidate> {
    vec![
        candidate("m1", "Low Tide", 2018, &["drama"], 0.82, 0.4, 1200, 104),
        candidate("m2", "Night Signal", 2021, &["thriller", "sci-fi"], 0.77, 0.6, 3400, 112),
        candidate("m3", "Paper Lanterns", 2016, &["drama", "romance"], 0.88, 0.3, 900, 98),
        candidate("m4", "Red Dust Run", 2019, &["action"], 0.71, 0.8, 8900, 126),
        candidate("m5", "The Quiet Ledger", 2022, &["drama", "mystery"], 0.85, 0.45, 2100, 118),
        candidate("m6", "Comet Season", 2015, &["comedy"], 0.69, 0.5, 1500, 95),
        candidate("m7", "Salt and Static", 2020, &["horror"], 0.74, 0.55, 2600, 101),
        candidate("m8", "The Long Harbor", 2023, &["drama", "adventure"], 0.9, 0.35, 700, 134),
    ]
}

fn tv_series() -> Vec<Candidate> {
    vec![
        candidate("t1", "Ashgrove", 2020, &["drama"], 0.83, 0.5, 5000, 45),
        candidate("t2", "Signal Lost", 2022, &["sci-fi", "thriller"], 0.79, 0.65, 7200, 50),
        candidate("t3", "Harbor Light", 2017, &["mystery"], 0.76, 0.4, 2200, 42),
        candidate("t4", "The Understudy", 2021, &["comedy", "drama"], 0.81, 0.45, 3100, 30),
        candidate("t5", "Cold Front", 2019, &["crime"], 0.73, 0.55, 4400, 48),
        candidate("t6", "Nine Lanterns", 2023, &["fantasy"], 0.86, 0.3, 1600, 55),
    ]
}

fn documentaries() -> Vec<Candidate> {
    vec![
        candidate("d1", "Deep Current", 2019, &["nature"], 0.88, 0.3, 600, 90),
        candidate("d2", "The Archive Room", 2021, &["history"], 0.8, 0.25, 400, 85),
        candidate("d3", "Cold Case: Hartwell", 2020, &["true-crime"], 0.75, 0.5, 1800, 96),
        candidate("d4", "Inside the Swarm", 2022, &["science"], 0.84, 0.35, 900, 78),
        candidate("d5", "Borderlines", 2016, &["history", "politics"], 0.78, 0.2, 300, 102),
    ]
}

fn pool_for(domain: Domain) -> Vec<Candidate> {
    match domain {
        Domain::Movies => movies(),
        Domain::TvSeries => tv_series(),
        Domain::Documentaries => documentaries(),
    }
}

/// The demo catalog-fallback pool: a fixed sample per domain, held entirely
/// in memory (§4.6, §4.13 step 5).
pub struct DemoCatalogPool;

impl CatalogPool for DemoCatalogPool {
    fn snapshot(&self, domain: Domain) -> Vec<Candidate> {
        pool_for(domain)
    }
}

/// No external vector index is wired up by default, so every retrieval call
/// reports itself unavailable and the Orchestrator falls back to
/// [`DemoCatalogPool`] via `catalog_fallback` (§4.6, §4.13 step 5). A real
/// deployment replaces this with a client for its vector database.
pub struct DemoVectorIndex;

#[async_trait]
impl VectorIndex for DemoVectorIndex {
    async fn search(&self, _query: RetrievalQuery<'_>, _filters: &FilterPredicate, _top_k: usize) -> anyhow::Result<Vec<Candidate>> {
        anyhow::bail!("no vector index configured for this deployment")
    }
}

/// Detail lookup over the same fixed sample, keyed by candidate id (§4.8).
/// Unknown ids come back as a best-effort miss, same as a real catalog API
/// returning 404.
pub struct DemoCatalogProvider {
    details: HashMap<&'static str, CatalogDetail>,
}

impl Default for DemoCatalogProvider {
    fn default() -> Self {
        let mut details = HashMap::new();
        for (id, synopsis) in [
            ("m1", "A quiet family drama about what the tide leaves behind."),
            ("m2", "A late-night broadcast picks up something it shouldn't."),
            ("m3", "Two estranged siblings sort through a childhood they remember differently."),
            ("m4", "A border courier outruns a debt he never agreed to."),
            ("m5", "An accountant uncovers a decade of quiet fraud."),
            ("m6", "A small town waits out a comet that never quite arrives."),
            ("m7", "Something in the marsh keeps the lights flickering."),
            ("m8", "A cargo captain takes one last run up a river that's drying out."),
            ("t1", "A town built on one family's secrets, season after season."),
            ("t2", "A research station loses contact, then gets it back, changed."),
            ("t3", "A retired detective can't let one cold case go."),
            ("t4", "A theater troupe's understudy keeps getting the lead."),
            ("t5", "A string of unsolved cases follows the same detective for years."),
            ("t6", "Nine households, one shared and unexplained light in the sky."),
            ("d1", "A year inside a river system few have ever filmed."),
            ("d2", "The people who kept records nobody asked them to keep."),
            ("d3", "A small-town disappearance, thirty years on."),
            ("d4", "Inside a hive, frame by frame, for a full season."),
            ("d5", "The lines on the map that moved twice in one lifetime."),
        ] {
            details.insert(
                id,
                CatalogDetail {
                    poster_path: Some(format!("/{id}.jpg")),
                    backdrop_path: Some(format!("/{id}_backdrop.jpg")),
                    overview: Some(synopsis.to_string()),
                    cast: vec!["Sample Cast A".to_string(), "Sample Cast B".to_string()],
                    streaming_providers: vec!["Demo Stream".to_string()],
                },
            );
        }
        Self { details }
    }
}

#[async_trait]
impl CatalogProvider for DemoCatalogProvider {
    async fn fetch_detail(&self, candidate_id: &str) -> anyhow::Result<CatalogDetail> {
        self.details
            .get(candidate_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no detail for candidate {candidate_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_domain_has_a_non_empty_pool() {
        let pool = DemoCatalogPool;
        for domain in Domain::all() {
            assert!(!pool.snapshot(*domain).is_empty());
        }
    }

    #[tokio::test]
    async fn vector_index_always_reports_unavailable() {
        let index = DemoVectorIndex;
        let result = index.search(RetrievalQuery::Text("cozy"), &FilterPredicate::default(), 10).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn provider_resolves_seeded_ids() {
        let provider = DemoCatalogProvider::default();
        let detail = provider.fetch_detail("m1").await.unwrap();
        assert!(detail.poster_path.is_some());
    }

    #[tokio::test]
    async fn provider_misses_unknown_ids() {
        let provider = DemoCatalogProvider::default();
        assert!(provider.fetch_detail("unknown").await.is_err());
    }
}
