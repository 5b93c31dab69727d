//! Surprise Engine (C9, §4.9).
//!
//! Selects a strategy, carves a handful of existing candidates out as
//! "surprise slots", and re-merges them into the expected list at the fixed
//! strategic-mix ranks.

mod strategy;

pub use strategy::select_strategy;

use crate::types::constants::STRATEGIC_MIX_RANKS;
use crate::types::{Context, DiscoveryMode, EmotionalProfile, Openness, RecommendationItem, SurpriseKind, SurpriseStrategy};
use rand::rngs::StdRng;
use rand::Rng;

pub struct SurpriseEngine {
    serendipity_factor: f32,
}

impl SurpriseEngine {
    #[must_use]
    pub fn new(serendipity_factor: f32) -> Self {
        Self { serendipity_factor }
    }

    /// Mix surprise slots into `enriched` (already enrichment-complete,
    /// ordered by relevance). Requires at least 10 items to engage at all
    /// (§4.9); shorter lists pass through untouched.
    pub fn apply(
        &self,
        enriched: Vec<RecommendationItem>,
        profile: &EmotionalProfile,
        context: &Context,
        discovery_mode: Option<DiscoveryMode>,
        rng: &mut StdRng,
    ) -> Vec<RecommendationItem> {
        if enriched.len() < 10 {
            return enriched;
        }

        let strategy = select_strategy(profile, context, rng);
        let count = self.surprise_count(enriched.len(), discovery_mode, profile.openness);

        let split_at = enriched.len() - count;
        let (expected, surprise_pool) = enriched.split_at(split_at);
        let mut expected: Vec<RecommendationItem> = expected.to_vec();
        let mut surprises: Vec<RecommendationItem> = surprise_pool.to_vec();

        let mut used_kinds = Vec::new();
        for (slot, item) in surprises.iter_mut().enumerate() {
            let kind = self.kind_for_slot(slot, strategy, &used_kinds, rng);
            used_kinds.push(kind);
            item.is_surprise = true;
            item.surprise_kind = Some(kind);
            item.surprise_reason = Some(reason_for(kind));
            item.surprise_confidence = Some(self.confidence_for(item));
        }

        strategic_mix(&mut expected, surprises);
        expected
    }

    /// Base 2, +2 for `discovery_mode=surprise`, +1 for `openness=exploring`,
    /// capped at `floor(0.4 * list_length)` and at the number of anchored
    /// strategic-mix ranks (only [`STRATEGIC_MIX_RANKS`] positions exist).
    fn surprise_count(&self, list_length: usize, discovery_mode: Option<DiscoveryMode>, openness: Openness) -> usize {
        let mut count = 2usize;
        if discovery_mode == Some(DiscoveryMode::Surprise) {
            count += 2;
        }
        if openness == Openness::Exploring {
            count += 1;
        }
        let cap = ((list_length as f32) * 0.4).floor() as usize;
        count.min(cap).min(STRATEGIC_MIX_RANKS.len())
    }

    fn kind_for_slot(&self, slot: usize, strategy: SurpriseStrategy, used: &[SurpriseKind], rng: &mut StdRng) -> SurpriseKind {
        let is_safe = strategy == SurpriseStrategy::Safe;
        match slot {
            0 if is_safe => SurpriseKind::HiddenGem,
            0 => SurpriseKind::AdjacentDiscovery,
            1 if is_safe => SurpriseKind::AdjacentDiscovery,
            1 => SurpriseKind::Wildcard,
            _ => {
                let remaining: Vec<SurpriseKind> = SurpriseKind::all()
                    .iter()
                    .copied()
                    .filter(|k| !used.contains(k))
                    .collect();
                let pool = if remaining.is_empty() { SurpriseKind::all() } else { remaining.as_slice() };
                pool[rng.gen_range(0..pool.len())]
            }
        }
    }

    fn confidence_for(&self, item: &RecommendationItem) -> u8 {
        let base = item.quality_score.clamp(0.0, 1.0) * 100.0;
        let blended = base * (1.0 - self.serendipity_factor) + 50.0 * self.serendipity_factor;
        blended.round().clamp(0.0, 100.0) as u8
    }
}

fn reason_for(kind: SurpriseKind) -> String {
    match kind {
        SurpriseKind::HiddenGem => "A quietly excellent pick that doesn't get much attention.".to_string(),
        SurpriseKind::AdjacentDiscovery => "Close to what you like, with a twist.".to_string(),
        SurpriseKind::Wildcard => "A genuine departure, in the best way.".to_string(),
        SurpriseKind::TimeCapsule => "Something from another era that still holds up.".to_string(),
        SurpriseKind::ForeignSurprise => "A great pick from outside your usual language or region.".to_string(),
        SurpriseKind::GenreBending => "Doesn't sit neatly in one genre, and that's the point.".to_string(),
    }
}

/// Insert `surprises` at ranks 3, 6, 8 (1-based) ahead of whatever would
/// otherwise land there, filling all other positions from `expected` in
/// order. No identifier appears twice (§4.9).
fn strategic_mix(expected: &mut Vec<RecommendationItem>, surprises: Vec<RecommendationItem>) {
    let total = expected.len() + surprises.len();
    let mut merged = Vec::with_capacity(total);
    let mut expected_iter = expected.drain(..);
    let mut surprises = surprises.into_iter();

    for rank in 1..=total {
        if STRATEGIC_MIX_RANKS.contains(&rank) {
            if let Some(surprise) = surprises.next() {
                merged.push(surprise);
                continue;
            }
        }
        if let Some(item) = expected_iter.next() {
            merged.push(item);
        } else if let Some(surprise) = surprises.next() {
            merged.push(surprise);
        }
    }

    for (rank, item) in merged.iter_mut().enumerate() {
        item.rank = (rank + 1) as u32;
    }

    *expected = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn item(id: &str, quality: f32) -> RecommendationItem {
        RecommendationItem {
            id: id.to_string(),
            title: id.to_string(),
            release_year: 2000,
            genres: vec![],
            quality_score: quality,
            popularity: 1.0,
            vote_count: 10,
            runtime_minutes: 100,
            similarity: 0.8,
            poster_url: None,
            backdrop_url: None,
            synopsis: None,
            cast: vec![],
            streaming: vec![],
            is_surprise: false,
            surprise_kind: None,
            surprise_reason: None,
            surprise_confidence: None,
            rank: 0,
        }
    }

    fn noon_context() -> Context {
        Context {
            time_of_day: crate::types::TimeOfDay::Afternoon,
            day_class: crate::types::DayClass::Weekday,
            season: crate::types::Season::Summer,
            timezone: "UTC".to_string(),
            attention_level: None,
            discovery_mode: None,
            personal_context: None,
        }
    }

    #[test]
    fn short_lists_pass_through_untouched() {
        let engine = SurpriseEngine::new(0.1);
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<_> = (0..5).map(|i| item(&i.to_string(), 0.5)).collect();
        let result = engine.apply(items.clone(), &EmotionalProfile::default(), &noon_context(), None, &mut rng);
        assert_eq!(result, items);
    }

    #[test]
    fn mixing_never_duplicates_an_identifier() {
        let engine = SurpriseEngine::new(0.1);
        let mut rng = StdRng::seed_from_u64(42);
        let items: Vec<_> = (0..15).map(|i| item(&i.to_string(), 0.5 + (i as f32) * 0.01)).collect();
        let result = engine.apply(items, &EmotionalProfile::default(), &noon_context(), Some(DiscoveryMode::Surprise), &mut rng);
        let mut ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();
        let len_before_dedup = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len_before_dedup);
    }

    #[test]
    fn surprise_slots_land_at_strategic_mix_ranks() {
        let engine = SurpriseEngine::new(0.1);
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<_> = (0..15).map(|i| item(&i.to_string(), 0.5)).collect();
        let result = engine.apply(items, &EmotionalProfile::default(), &noon_context(), Some(DiscoveryMode::Surprise), &mut rng);
        for &rank in STRATEGIC_MIX_RANKS.iter() {
            assert!(result[rank - 1].is_surprise, "rank {rank} should be a surprise slot");
        }
    }
}
