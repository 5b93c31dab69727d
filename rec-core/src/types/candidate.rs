//! Candidate and Recommendation Item entities (§3).

use super::domain::SurpriseKind;
use serde::{Deserialize, Serialize};

/// A retrieval hit before enrichment (§3). Immutable per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub release_year: u16,
    pub genres: Vec<String>,
    pub quality_score: f32,
    pub popularity: f32,
    pub vote_count: u32,
    pub runtime_minutes: u16,
    /// Similarity score assigned by retrieval, in `[0, 1]`.
    pub similarity: f32,
}

/// An enriched candidate returned to the client, with optional surprise
/// metadata (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub id: String,
    pub title: String,
    pub release_year: u16,
    pub genres: Vec<String>,
    pub quality_score: f32,
    pub popularity: f32,
    pub vote_count: u32,
    pub runtime_minutes: u16,
    pub similarity: f32,

    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub synopsis: Option<String>,
    pub cast: Vec<String>,
    pub streaming: Vec<String>,

    pub is_surprise: bool,
    pub surprise_kind: Option<SurpriseKind>,
    pub surprise_reason: Option<String>,
    pub surprise_confidence: Option<u8>,

    /// 1-based list position.
    pub rank: u32,
}

impl RecommendationItem {
    /// Build the retrieval-only shell of an item; enrichment fills the rest,
    /// best-effort (§4.8).
    #[must_use]
    pub fn from_candidate(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title,
            release_year: candidate.release_year,
            genres: candidate.genres,
            quality_score: candidate.quality_score,
            popularity: candidate.popularity,
            vote_count: candidate.vote_count,
            runtime_minutes: candidate.runtime_minutes,
            similarity: candidate.similarity,
            poster_url: None,
            backdrop_url: None,
            synopsis: None,
            cast: Vec::new(),
            streaming: Vec::new(),
            is_surprise: false,
            surprise_kind: None,
            surprise_reason: None,
            surprise_confidence: None,
            rank: 0,
        }
    }
}
