//! Fixed catalog-detail -> [`RecommendationItem`] field mapping (§4.8, §6).

use crate::types::{Candidate, RecommendationItem};

/// Raw detail payload as returned by a [`super::CatalogProvider`], using the
/// catalog's own field names (`poster_path`, not `poster_url`).
#[derive(Debug, Clone, Default)]
pub struct CatalogDetail {
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub cast: Vec<String>,
    pub streaming_providers: Vec<String>,
}

/// Apply the fixed field mapping: `poster_path` -> an absolute `poster_url`
/// under `image_base_url`, `overview` -> `synopsis`, and so on (§6). Fields
/// the detail omits become missing-field sentinels (`None` / empty `Vec`)
/// rather than causing the candidate to be dropped (§4.8).
#[must_use]
pub fn apply(candidate: Candidate, detail: Option<CatalogDetail>, image_base_url: &str) -> RecommendationItem {
    let mut item = RecommendationItem::from_candidate(candidate);
    let Some(detail) = detail else {
        return item;
    };

    item.poster_url = detail.poster_path.map(|path| format!("{image_base_url}{path}"));
    item.backdrop_url = detail.backdrop_path.map(|path| format!("{image_base_url}{path}"));
    item.synopsis = detail.overview;
    item.cast = detail.cast;
    item.streaming = detail.streaming_providers;
    item
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            id: "1".to_string(),
            title: "A Movie".to_string(),
            release_year: 2000,
            genres: vec![],
            quality_score: 0.8,
            popularity: 1.0,
            vote_count: 10,
            runtime_minutes: 100,
            similarity: 0.9,
        }
    }

    #[test]
    fn maps_poster_path_to_absolute_poster_url() {
        let detail = CatalogDetail {
            poster_path: Some("/abc.jpg".to_string()),
            ..Default::default()
        };
        let item = apply(candidate(), Some(detail), "https://img.example/");
        assert_eq!(item.poster_url.as_deref(), Some("https://img.example//abc.jpg"));
    }

    #[test]
    fn missing_detail_leaves_sentinels_rather_than_dropping_item() {
        let item = apply(candidate(), None, "https://img.example/");
        assert_eq!(item.id, "1");
        assert!(item.poster_url.is_none());
        assert!(item.cast.is_empty());
    }
}
