//! Deterministic weighted fallback vector (§4.5): maps the fixed trait
//! vocabulary into fixed, contiguous index ranges of a 1536-wide vector, then
//! L2-normalizes. Reachable and correct with no `EmbeddingProvider` at all.

use crate::types::constants::EMBEDDING_DIMENSION;
use std::collections::HashMap;

/// The closed trait vocabulary recognized by the fallback, in a fixed order
/// — each entry owns one contiguous band of the output vector. A trait
/// absent from this list contributes nothing (it is outside the fixed
/// dimension mapping named in §4.5).
const TRAIT_VOCABULARY: &[&str] = &[
    "energy_drained",
    "energy_neutral",
    "energy_energized",
    "melancholic",
    "content",
    "adventurous",
    "comfort_zone",
    "exploring",
    "experimental",
    "scattered",
    "present",
    "immersed",
    "cozy",
    "intense",
    "slow_burn",
    "comfort",
    "surprise",
];

/// Build the fallback vector from answer-option trait weights. Deterministic
/// regardless of the input map's iteration order: each recognized trait owns
/// a disjoint band, so contributions never interact.
#[must_use]
pub fn fallback_vector(trait_weights: &HashMap<String, f32>) -> Vec<f32> {
    let mut vector = vec![0.0f32; EMBEDDING_DIMENSION];
    let band_width = EMBEDDING_DIMENSION / TRAIT_VOCABULARY.len();

    for (band, trait_name) in TRAIT_VOCABULARY.iter().enumerate() {
        let Some(&weight) = trait_weights.get(*trait_name) else {
            continue;
        };
        let start = band * band_width;
        let end = start + band_width;
        let fill = weight / (band_width as f32).sqrt();
        for slot in &mut vector[start..end] {
            *slot = fill;
        }
    }

    l2_normalize(&mut vector);
    vector
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_traits_yield_zero_vector_of_fixed_width() {
        let vector = fallback_vector(&HashMap::new());
        assert_eq!(vector.len(), EMBEDDING_DIMENSION);
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn result_is_l2_normalized() {
        let weights = HashMap::from([("melancholic".to_string(), 1.0), ("exploring".to_string(), 0.5)]);
        let vector = fallback_vector(&weights);
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn is_deterministic_across_repeated_calls() {
        let weights = HashMap::from([("adventurous".to_string(), 0.8)]);
        assert_eq!(fallback_vector(&weights), fallback_vector(&weights));
    }

    #[test]
    fn unrecognized_trait_is_silently_ignored() {
        let weights = HashMap::from([("not_a_real_trait".to_string(), 5.0)]);
        let vector = fallback_vector(&weights);
        assert!(vector.iter().all(|&v| v == 0.0));
    }
}
