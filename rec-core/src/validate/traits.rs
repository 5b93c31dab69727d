//! Coarse trait derivation from an item's genres and quality band (§4.10).

use crate::types::{Energy, Mood, SurpriseKind};

/// Coarse energy band from the raw quality score.
#[must_use]
pub fn energy_band(quality_score: f32) -> Energy {
    if quality_score >= 0.7 {
        Energy::Energized
    } else if quality_score >= 0.4 {
        Energy::Neutral
    } else {
        Energy::Drained
    }
}

/// Distinct rating band, used by the diversity scalar. Deliberately finer
/// grained than [`energy_band`] so the two scalars don't collapse onto the
/// same distinction.
#[must_use]
pub fn rating_band(quality_score: f32) -> u8 {
    (quality_score.clamp(0.0, 1.0) * 10.0) as u8 / 3
}

/// Coarse mood from genre keywords, closed vocabulary, default `Content`.
#[must_use]
pub fn mood_for_genres(genres: &[String]) -> Mood {
    let lower: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
    if lower.iter().any(|g| matches!(g.as_str(), "thriller" | "horror" | "action")) {
        Mood::Adventurous
    } else if lower.iter().any(|g| matches!(g.as_str(), "drama" | "documentary" | "biography")) {
        Mood::Melancholic
    } else {
        Mood::Content
    }
}

/// Coarse "style" bucket, used as a diversity axis distinct from mood.
#[must_use]
pub fn style_for_genres(genres: &[String]) -> &'static str {
    let lower: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
    if lower.iter().any(|g| matches!(g.as_str(), "animation" | "fantasy" | "sci-fi" | "science fiction")) {
        "stylized"
    } else if lower.iter().any(|g| matches!(g.as_str(), "documentary" | "biography" | "history")) {
        "observational"
    } else {
        "naturalistic"
    }
}

/// Per-kind weight for the surprise-quality scalar (§4.10: "a function of
/// confidence and kind"). Kinds that ask more of the viewer's trust earn a
/// slightly higher ceiling when they land.
#[must_use]
pub fn kind_weight(kind: SurpriseKind) -> f32 {
    match kind {
        SurpriseKind::HiddenGem | SurpriseKind::Wildcard => 1.0,
        SurpriseKind::AdjacentDiscovery => 0.85,
        SurpriseKind::TimeCapsule | SurpriseKind::ForeignSurprise | SurpriseKind::GenreBending => 0.9,
    }
}
