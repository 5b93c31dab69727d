//! Filter Predicate and Query Key (§3).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A conjunction of closed-set constraints (§3). The empty predicate matches
/// everything. Genre sets use `BTreeSet` so fingerprinting is independent of
/// insertion order, matching the "JSON field order MUST NOT affect them"
/// requirement on [`QueryKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPredicate {
    pub min_release_year: Option<u16>,
    pub max_release_year: Option<u16>,
    pub min_rating: Option<f32>,
    pub min_runtime_minutes: Option<u16>,
    pub max_runtime_minutes: Option<u16>,
    pub min_vote_count: Option<u32>,
    pub min_popularity: Option<f32>,
    pub max_popularity: Option<f32>,
    pub include_genres: BTreeSet<String>,
    pub exclude_genres: BTreeSet<String>,
}

impl FilterPredicate {
    /// Merge `other` on top of `self`: numeric bounds tighten (max of mins,
    /// min of maxes), genre sets union. Used by Refinement/Quick-Adjust
    /// overlays (§4.11, §4.12).
    #[must_use]
    pub fn tighten(mut self, other: &FilterPredicate) -> Self {
        self.min_release_year = tighten_min(self.min_release_year, other.min_release_year);
        self.max_release_year = tighten_max(self.max_release_year, other.max_release_year);
        self.min_rating = tighten_min_f32(self.min_rating, other.min_rating);
        self.min_runtime_minutes = tighten_min(self.min_runtime_minutes, other.min_runtime_minutes);
        self.max_runtime_minutes = tighten_max(self.max_runtime_minutes, other.max_runtime_minutes);
        self.min_vote_count = tighten_min(self.min_vote_count, other.min_vote_count);
        self.min_popularity = tighten_min_f32(self.min_popularity, other.min_popularity);
        self.max_popularity = tighten_max_f32(self.max_popularity, other.max_popularity);
        self.include_genres.extend(other.include_genres.iter().cloned());
        self.exclude_genres.extend(other.exclude_genres.iter().cloned());
        self
    }

    /// Whether a candidate satisfies every constraint (used by the
    /// catalog-backed fallback retrieval, §4.6).
    #[must_use]
    pub fn matches(&self, candidate: &crate::types::Candidate) -> bool {
        if let Some(min) = self.min_release_year {
            if candidate.release_year < min {
                return false;
            }
        }
        if let Some(max) = self.max_release_year {
            if candidate.release_year > max {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if candidate.quality_score < min {
                return false;
            }
        }
        if let Some(min) = self.min_runtime_minutes {
            if candidate.runtime_minutes < min {
                return false;
            }
        }
        if let Some(max) = self.max_runtime_minutes {
            if candidate.runtime_minutes > max {
                return false;
            }
        }
        if let Some(min) = self.min_vote_count {
            if candidate.vote_count < min {
                return false;
            }
        }
        if let Some(min) = self.min_popularity {
            if candidate.popularity < min {
                return false;
            }
        }
        if let Some(max) = self.max_popularity {
            if candidate.popularity > max {
                return false;
            }
        }
        if !self.include_genres.is_empty()
            && !candidate.genres.iter().any(|g| self.include_genres.contains(g))
        {
            return false;
        }
        if candidate.genres.iter().any(|g| self.exclude_genres.contains(g)) {
            return false;
        }
        true
    }

    /// Deterministic fingerprint of the canonicalized predicate (§3).
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_option(self.min_release_year, &mut hasher);
        hash_option(self.max_release_year, &mut hasher);
        hash_option(self.min_rating.map(ordered_f32), &mut hasher);
        hash_option(self.min_runtime_minutes, &mut hasher);
        hash_option(self.max_runtime_minutes, &mut hasher);
        hash_option(self.min_vote_count, &mut hasher);
        hash_option(self.min_popularity.map(ordered_f32), &mut hasher);
        hash_option(self.max_popularity.map(ordered_f32), &mut hasher);
        for g in &self.include_genres {
            g.hash(&mut hasher);
        }
        0xFFFF_FFFFu64.hash(&mut hasher); // separator
        for g in &self.exclude_genres {
            g.hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn hash_option<T: Hash>(value: Option<T>, hasher: &mut DefaultHasher) {
    value.is_some().hash(hasher);
    if let Some(v) = value {
        v.hash(hasher);
    }
}

/// `f32` does not implement `Hash`/`Eq`; bit-pattern on a canonicalized value
/// (no NaNs expected from this domain) gives a stable, order-independent hash.
fn ordered_f32(value: f32) -> u32 {
    value.to_bits()
}

fn tighten_min<T: Ord + Copy>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a > b { a } else { b }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn tighten_max<T: Ord + Copy>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a < b { a } else { b }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn tighten_min_f32(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn tighten_max_f32(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Deterministic byte-stable key used by the caches (§3): a fingerprint of
/// the retrieval input plus a fingerprint of the filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub query_fingerprint: u64,
    pub filter_fingerprint: u64,
}

impl QueryKey {
    #[must_use]
    pub fn new(query_text: &str, filters: &FilterPredicate) -> Self {
        let mut hasher = DefaultHasher::new();
        query_text.hash(&mut hasher);
        Self {
            query_fingerprint: hasher.finish(),
            filter_fingerprint: filters.fingerprint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_order_independent() {
        let mut a = FilterPredicate::default();
        a.include_genres.insert("drama".into());
        a.include_genres.insert("comedy".into());

        let mut b = FilterPredicate::default();
        b.include_genres.insert("comedy".into());
        b.include_genres.insert("drama".into());

        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn empty_predicate_matches_all() {
        let predicate = FilterPredicate::default();
        let candidate = crate::types::Candidate {
            id: "1".into(),
            title: "t".into(),
            release_year: 1990,
            genres: vec!["horror".into()],
            quality_score: 1.0,
            popularity: 1.0,
            vote_count: 0,
            runtime_minutes: 10,
            similarity: 0.0,
        };
        assert!(predicate.matches(&candidate));
    }
}
