//! Pipeline Orchestrator (C13, §4.13).
//!
//! Composes every other component in the fixed order C4→C5→C6→C7→C8→C9→C10,
//! enforces per-stage deadlines and an overall request budget, and is the
//! only place collaborator failures get turned into either a typed error
//! (session store) or a degraded-but-successful response (everything else).

mod outcome;
mod pool;

pub use outcome::{
    all_quick_adjustments, AdjustOutcome, AnswerOutcome, RecommendationOutcome, RefineOutcome,
    StartOutcome,
};
pub use pool::{CatalogPool, EmptyCatalogPool};

use crate::adjust::adjustment_for;
use crate::analytics::{AnalyticsEvent, AnalyticsWriter};
use crate::cache::ResultCache;
use crate::catalog::QuestionCatalog;
use crate::embeddings::{fallback::fallback_vector, EmbeddingCache, EmbeddingProvider};
use crate::enrich::{CatalogProvider, Enricher};
use crate::error::{Error, Result};
use crate::flow::FlowPlanner;
use crate::mapper::{map_filters, map_profile, map_query};
use crate::refine::{delta_for, detect_strategy, RefinementRequest};
use crate::retrieval::{catalog_fallback, RetrievalClient, RetrievalQuery, VectorIndex};
use crate::session::SessionStore;
use crate::surprise::SurpriseEngine;
use crate::types::constants::MAX_RECOMMENDATIONS;
use crate::types::{
    AdjustmentType, AnsweredQuestion, Context, Domain, FilterPredicate, FlowName,
    MomentSummary, QueryKey, RecommendationItem, RecommenderConfig, RequestContext, Session,
};
use crate::validate::{moment_summary, validate, ValidationScore};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;
use tracing::{instrument, warn};
use uuid::Uuid;

/// The stateless, process-wide pipeline orchestrator. One instance is built
/// at startup from a [`RecommenderConfig`] plus the collaborator set, and
/// shared across requests behind an `Arc` by the service layer.
pub struct Orchestrator {
    config: RecommenderConfig,
    session_store: Arc<dyn SessionStore>,
    flow_planner: FlowPlanner,
    embeddings: EmbeddingCache,
    retrieval: RetrievalClient,
    result_cache: ResultCache,
    catalog_pool: Arc<dyn CatalogPool>,
    enricher: Enricher,
    surprise: SurpriseEngine,
    analytics: Arc<AnalyticsWriter>,
}

impl Orchestrator {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: RecommenderConfig,
        session_store: Arc<dyn SessionStore>,
        catalog: Arc<dyn QuestionCatalog>,
        vector_index: Arc<dyn VectorIndex>,
        catalog_pool: Arc<dyn CatalogPool>,
        catalog_provider: Arc<dyn CatalogProvider>,
        embedding_provider: Option<Box<dyn EmbeddingProvider>>,
        analytics: Arc<AnalyticsWriter>,
        image_base_url: String,
    ) -> Self {
        let embeddings = EmbeddingCache::new(embedding_provider, config.cache.embedding_ttl);
        let result_cache = ResultCache::new(config.cache.result_cache_capacity, config.cache.result_ttl);
        let enricher = Enricher::new(
            catalog_provider,
            config.cache.enrichment_cache_capacity,
            config.cache.enrichment_ttl,
            config.retrieval.enrichment_concurrency,
            image_base_url,
        );
        let retrieval = RetrievalClient::new(vector_index);
        let flow_planner = FlowPlanner::new(catalog);
        let surprise = SurpriseEngine::new(config.surprise.serendipity_factor);

        Self {
            config,
            session_store,
            flow_planner,
            embeddings,
            retrieval,
            result_cache,
            catalog_pool,
            enricher,
            surprise,
            analytics,
        }
    }

    /// `POST /start` (§6, §4.2, §4.3).
    #[instrument(skip(self, request_context))]
    pub async fn start(
        &self,
        domain: Domain,
        flow_name: FlowName,
        request_context: RequestContext,
    ) -> Result<StartOutcome> {
        let now = Utc::now();
        let context = Context::resolve(&request_context, now);
        let flow = self.flow_planner.plan(domain, flow_name, context).await?;

        let session = Session::new(domain, flow.clone(), now);
        let session = self.session_store.create(session).await?;

        self.analytics.emit(AnalyticsEvent::SessionCreated {
            session_id: session.id,
            domain,
            at: now,
        });

        let question = session.next_question().cloned();
        let progress = session.progress();

        Ok(StartOutcome {
            session_id: session.id,
            domain,
            greeting: flow.greeting,
            question,
            progress,
            flow_type: flow.flow_type,
            context: flow.context,
        })
    }

    /// `POST /answer/{sessionId}` (§6, §3 invariant a).
    #[instrument(skip(self))]
    pub async fn answer(
        &self,
        session_id: Uuid,
        question_id: String,
        option_id: String,
        response_time_ms: Option<u64>,
    ) -> Result<AnswerOutcome> {
        let answer = AnsweredQuestion {
            question_id,
            option_id,
            responded_at: Utc::now(),
            response_time_ms,
        };

        let session = self
            .session_store
            .update(
                session_id,
                Box::new(move |s: &mut Session| {
                    s.record_answer(answer);
                }),
            )
            .await?;

        if !session.is_complete() {
            let question = session
                .next_question()
                .cloned()
                .ok_or_else(|| Error::Internal("incomplete session has no next question".to_string()))?;
            return Ok(AnswerOutcome::NextQuestion {
                question,
                progress: session.progress(),
            });
        }

        let run = self.recommend(&session, None, None, None).await?;
        self.persist_recommendations(session_id, &run).await?;

        Ok(AnswerOutcome::Recommendations(RecommendationOutcome {
            items: run.items,
            moment: run.moment,
            validation: run.validation,
            can_refine: true,
            quick_adjustments: all_quick_adjustments(),
        }))
    }

    /// `POST /refine/{sessionId}` (§6, §4.11).
    #[instrument(skip(self, request))]
    pub async fn refine(&self, session_id: Uuid, request: RefinementRequest) -> Result<RefineOutcome> {
        let session = self.session_store.get(session_id).await?;

        let strategy = detect_strategy(&request);
        let delta = delta_for(strategy);

        let run = self
            .recommend(&session, Some(delta.filter_overlay.clone()), Some(delta.trait_adjustments.clone()), None)
            .await?;
        self.persist_recommendations(session_id, &run).await?;

        let confidence = f32::from(run.validation.overall) / 100.0;
        self.session_store
            .update(
                session_id,
                Box::new(move |s: &mut Session| {
                    s.refinement_history.push(crate::types::RefinementRecord {
                        strategy,
                        confidence,
                        explanation: delta.explanation.to_string(),
                        applied_at: Utc::now(),
                    });
                }),
            )
            .await?;
        self.analytics.emit(AnalyticsEvent::RefinementApplied {
            session_id,
            strategy,
            at: Utc::now(),
        });

        Ok(RefineOutcome {
            items: run.items,
            strategy,
            confidence,
            explanation: delta_for(strategy).explanation.to_string(),
            validation: run.validation,
        })
    }

    /// `POST /adjust/{sessionId}` (§6, §4.12).
    #[instrument(skip(self))]
    pub async fn adjust(&self, session_id: Uuid, name: &str) -> Result<AdjustOutcome> {
        let session = self.session_store.get(session_id).await?;
        let delta = adjustment_for(name)?;
        let adjustment = AdjustmentType::from_str(name).map_err(|()| Error::Validation(format!("unknown adjustment: {name}")))?;

        let run = self
            .recommend(&session, Some(delta.filter_delta.clone()), None, delta.query_suffix)
            .await?;
        self.persist_recommendations(session_id, &run).await?;

        Ok(AdjustOutcome {
            adjustment,
            items: run.items,
        })
    }

    /// `POST /interaction/{sessionId}` (§6): a best-effort engagement log.
    /// Not one of the four typed analytics families in §4.14, so it only
    /// touches the session's TTL and traces the event; it never fails the
    /// request over a logging problem.
    #[instrument(skip(self, metadata))]
    pub async fn record_interaction(
        &self,
        session_id: Uuid,
        movie_id: &str,
        interaction_type: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<()> {
        self.session_store.touch(session_id).await?;
        tracing::info!(%session_id, movie_id, interaction_type, ?metadata, "interaction recorded");
        Ok(())
    }

    /// `GET /moment/{sessionId}` (§6, §4.10).
    #[instrument(skip(self))]
    pub async fn moment(&self, session_id: Uuid) -> Result<MomentSummary> {
        let session = self.session_store.get(session_id).await?;
        let profile = session.profile.unwrap_or_default();
        let validation = validate(&session.last_recommendations, &profile);
        Ok(moment_summary(&profile, f32::from(validation.overall) / 100.0))
    }

    async fn persist_recommendations(&self, session_id: Uuid, run: &PipelineRun) -> Result<()> {
        let items = run.items.clone();
        let profile = run.profile;
        self.session_store
            .update(
                session_id,
                Box::new(move |s: &mut Session| {
                    s.profile = Some(profile);
                    s.last_recommendations = items;
                }),
            )
            .await?;
        Ok(())
    }

    /// Runs C4 through C10 against `session`'s current answer set, applying
    /// an optional filter overlay, trait-weight overlay, and query-text
    /// suffix (§4.11, §4.12 both re-run the pipeline from this point with a
    /// delta layered on top of the plain mapper output).
    async fn recommend(
        &self,
        session: &Session,
        filters_overlay: Option<FilterPredicate>,
        trait_overlay: Option<HashMap<String, f32>>,
        query_suffix: Option<&str>,
    ) -> Result<PipelineRun> {
        let budget = Budget::new(self.config.retrieval.total_request_budget);
        let cancellation = CancellationToken::new();
        let mut degraded = false;

        // C4: Preference Mapper — pure, synchronous, no suspension points (§5).
        let mut query_text = map_query(&session.answers, &session.flow);
        if let Some(suffix) = query_suffix {
            query_text = format!("{query_text} {suffix}");
        }
        let mut filters = map_filters(&session.answers, &session.flow, &session.flow.context);
        if let Some(overlay) = &filters_overlay {
            filters = filters.tighten(overlay);
        }
        let profile = map_profile(&session.answers, &session.flow);
        let trait_weights = apply_trait_overlay(aggregate_trait_weights(session), trait_overlay);

        // C5: Embedding Cache.
        let embedding_key = QueryKey::new(&query_text, &FilterPredicate::default()).query_fingerprint;
        let embedding_fut = self
            .embeddings
            .get_or_compute(embedding_key, &query_text, &session.answers, &trait_weights);
        let embedding = match self
            .guarded(&budget, &cancellation, self.config.retrieval.embedding_deadline, embedding_fut)
            .await
        {
            Some((vector, cache_hit)) => {
                self.analytics.emit(AnalyticsEvent::EmbeddingComputed {
                    session_id: session.id,
                    cache_hit,
                    at: Utc::now(),
                });
                vector
            }
            None => {
                degraded = true;
                warn!(session_id = %session.id, "embedding stage missed its deadline, using local fallback vector");
                fallback_vector(&trait_weights)
            }
        };

        // C6/C7: Retrieval Client with the Result Cache in front, falling
        // back to the catalog-backed local sort on any collaborator failure
        // or deadline miss (§4.6, §4.13 step 5).
        let top_k = self.config.retrieval.default_top_k;
        let query_key = QueryKey::new(&query_text, &filters);
        let candidates = if let Some(cached) = self.result_cache.get(&query_key) {
            cached
        } else {
            let retrieval_fut = self.retrieval.search(RetrievalQuery::Vector(&embedding), &filters, top_k);
            match self
                .guarded(&budget, &cancellation, self.config.retrieval.retrieval_deadline, retrieval_fut)
                .await
            {
                Some(Ok(candidates)) => {
                    self.result_cache.put(query_key, candidates.clone());
                    candidates
                }
                Some(Err(error)) => {
                    warn!(session_id = %session.id, %error, "retrieval unavailable, using catalog-backed fallback");
                    degraded = true;
                    let pool = self.catalog_pool.snapshot(session.domain);
                    catalog_fallback(&pool, &filters, top_k)
                }
                None => {
                    warn!(session_id = %session.id, "retrieval missed its deadline, using catalog-backed fallback");
                    degraded = true;
                    let pool = self.catalog_pool.snapshot(session.domain);
                    catalog_fallback(&pool, &filters, top_k)
                }
            }
        };

        // C8: Enricher, best-effort per item (§4.8); on an overall timeout the
        // retrieval-only shells are returned rather than nothing.
        let enrichment_cap = self.config.retrieval.enrichment_deadline_per_item * (candidates.len().max(1) as u32);
        let enrich_fut = self.enricher.enrich(candidates.clone());
        let enriched = match self.guarded(&budget, &cancellation, enrichment_cap, enrich_fut).await {
            Some(items) => items,
            None => {
                degraded = true;
                warn!(session_id = %session.id, "enrichment missed its deadline, returning unenriched items");
                candidates.into_iter().map(RecommendationItem::from_candidate).collect()
            }
        };

        // C9: Surprise Engine — local computation, no suspension point.
        let mut rng = seeded_rng(session.id);
        let mixed = self.surprise.apply(
            enriched,
            &profile,
            &session.flow.context,
            session.flow.context.discovery_mode,
            &mut rng,
        );
        let mut mixed = mixed;
        mixed.truncate(MAX_RECOMMENDATIONS);

        // C10: Validator.
        let mut validation = validate(&mixed, &profile);
        validation.degraded = degraded;
        let moment = moment_summary(&profile, f32::from(validation.overall) / 100.0);

        self.analytics.emit(AnalyticsEvent::ResultProduced {
            session_id: session.id,
            item_count: mixed.len(),
            degraded,
            at: Utc::now(),
        });

        Ok(PipelineRun {
            items: mixed,
            validation,
            moment,
            profile,
        })
    }

    /// Races `fut` against both `cancellation` and whatever of `stage_cap`
    /// fits inside the remaining overall request budget. `None` covers both
    /// a cancelled request and a stage that ran out of time — the caller
    /// decides what degraded behavior to fall back to.
    async fn guarded<T>(
        &self,
        budget: &Budget,
        cancellation: &CancellationToken,
        stage_cap: Duration,
        fut: impl std::future::Future<Output = T>,
    ) -> Option<T> {
        let remaining = budget.remaining();
        if remaining.is_zero() {
            return None;
        }
        let cap = remaining.min(stage_cap);
        tokio::select! {
            () = cancellation.cancelled() => None,
            result = tokio::time::timeout(cap, fut) => result.ok(),
        }
    }
}

/// Intermediate result of [`Orchestrator::recommend`], before the caller
/// decides how to persist it (answer completion vs. refine vs. adjust all
/// persist slightly different session fields).
struct PipelineRun {
    items: Vec<RecommendationItem>,
    validation: ValidationScore,
    moment: MomentSummary,
    profile: crate::types::EmotionalProfile,
}

struct Budget {
    deadline: std::time::Instant,
}

impl Budget {
    fn new(total: Duration) -> Self {
        Self {
            deadline: std::time::Instant::now() + total,
        }
    }

    fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(std::time::Instant::now())
    }
}

/// Highest trait weight per trait name across the session's answered
/// options, mirroring the Preference Mapper's own tie-break rule (§4.4.3).
fn aggregate_trait_weights(session: &Session) -> HashMap<String, f32> {
    let mut weights: HashMap<String, f32> = HashMap::new();
    for answer in &session.answers {
        let Some(question) = session.flow.questions.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };
        let Some(option) = question.option(&answer.option_id) else {
            continue;
        };
        for (trait_name, weight) in &option.traits {
            let entry = weights.entry(trait_name.clone()).or_insert(0.0);
            if *weight > *entry {
                *entry = *weight;
            }
        }
    }
    weights
}

/// Layers a Refinement/Quick-Adjust trait-weight delta on top of the base
/// weights derived from answers (§4.11), clamped back into `[0, 1]`.
fn apply_trait_overlay(mut base: HashMap<String, f32>, overlay: Option<HashMap<String, f32>>) -> HashMap<String, f32> {
    if let Some(overlay) = overlay {
        for (trait_name, delta) in overlay {
            let entry = base.entry(trait_name).or_insert(0.0);
            *entry = (*entry + delta).clamp(0.0, 1.0);
        }
    }
    base
}

/// Per-request RNG seed: deterministic within a call (so a single pipeline
/// run is reproducible for tests) but varying call to call (§4.9's coin
/// flip must not always land the same way for the same session).
fn seeded_rng(session_id: Uuid) -> StdRng {
    let mut hasher = DefaultHasher::new();
    session_id.hash(&mut hasher);
    Utc::now().timestamp_nanos_opt().unwrap_or(0).hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}
