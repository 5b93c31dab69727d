//! Validator (C10, §4.10).
//!
//! Scores an enriched, surprise-mixed list against the session's Emotional
//! Profile and produces a short "moment summary" for display alongside it.

mod moment;
mod traits;

pub use moment::moment_summary;

use crate::types::{EmotionalProfile, RecommendationItem};
use serde::{Deserialize, Serialize};
use traits::{energy_band, mood_for_genres, rating_band, style_for_genres};

/// The three §4.10 scalars plus the rounded overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationScore {
    pub emotional_match: f32,
    pub diversity: f32,
    pub surprise_quality: f32,
    pub overall: u8,
    /// Set by the Orchestrator, not by [`validate`] itself, when any pipeline
    /// stage missed its deadline or fell back to a degraded collaborator
    /// (§4.13, §7 propagation policy).
    pub degraded: bool,
}

#[must_use]
pub fn validate(items: &[RecommendationItem], profile: &EmotionalProfile) -> ValidationScore {
    let emotional_match = emotional_match(items, profile);
    let diversity = diversity(items);
    let surprise_quality = surprise_quality(items);

    let overall = (100.0 * (0.4 * emotional_match + 0.3 * diversity + 0.3 * surprise_quality))
        .round()
        .clamp(0.0, 100.0) as u8;

    ValidationScore {
        emotional_match,
        diversity,
        surprise_quality,
        overall,
        degraded: false,
    }
}

fn emotional_match(items: &[RecommendationItem], profile: &EmotionalProfile) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let total: f32 = items
        .iter()
        .map(|item| {
            let energy_hit = if energy_band(item.quality_score) == profile.energy { 1.0 } else { 0.0 };
            let mood_hit = if mood_for_genres(&item.genres) == profile.mood { 1.0 } else { 0.0 };
            (energy_hit + mood_hit) / 2.0
        })
        .sum();
    (total / items.len() as f32).clamp(0.0, 1.0)
}

fn diversity(items: &[RecommendationItem]) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let len = items.len() as f32;

    let distinct_genres = items.iter().flat_map(|i| i.genres.iter()).collect::<std::collections::HashSet<_>>().len();
    let distinct_decades = items
        .iter()
        .map(|i| i.release_year / 10)
        .collect::<std::collections::HashSet<_>>()
        .len();
    let distinct_styles = items.iter().map(|i| style_for_genres(&i.genres)).collect::<std::collections::HashSet<_>>().len();
    let distinct_rating_bands = items.iter().map(|i| rating_band(i.quality_score)).collect::<std::collections::HashSet<_>>().len();
    let surprise_ratio = items.iter().filter(|i| i.is_surprise).count() as f32 / len;

    let score = 0.3 * (distinct_genres as f32 / len).min(1.0)
        + 0.2 * (distinct_decades as f32 / len).min(1.0)
        + 0.2 * (distinct_styles as f32 / len).min(1.0)
        + 0.2 * (distinct_rating_bands as f32 / len).min(1.0)
        + 0.1 * surprise_ratio.min(1.0);

    score.clamp(0.0, 1.0)
}

fn surprise_quality(items: &[RecommendationItem]) -> f32 {
    let surprises: Vec<&RecommendationItem> = items.iter().filter(|i| i.is_surprise).collect();
    if surprises.is_empty() {
        return 0.0;
    }
    let total: f32 = surprises
        .iter()
        .map(|item| {
            let confidence = f32::from(item.surprise_confidence.unwrap_or(0)) / 100.0;
            let kind_weight = item.surprise_kind.map(traits::kind_weight).unwrap_or(0.8);
            (confidence * kind_weight).clamp(0.0, 1.0)
        })
        .sum();
    (total / surprises.len() as f32).clamp(0.0, 1.0)
}
