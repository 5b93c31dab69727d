//! Deterministic per-strategy delta (§4.11): a filter-predicate overlay plus
//! a trait-weight adjustment map, drawn from a fixed table.

use crate::types::{FilterPredicate, RefinementStrategy};
use std::collections::HashMap;

/// The delta a [`RefinementStrategy`] applies on top of the current
/// mapper output, plus the explanation shown to the client.
#[derive(Debug, Clone)]
pub struct RefinementDelta {
    pub filter_overlay: FilterPredicate,
    pub trait_adjustments: HashMap<String, f32>,
    pub explanation: &'static str,
}

#[must_use]
pub fn delta_for(strategy: RefinementStrategy) -> RefinementDelta {
    match strategy {
        RefinementStrategy::TooIntense => RefinementDelta {
            filter_overlay: FilterPredicate {
                max_runtime_minutes: Some(110),
                ..FilterPredicate::default()
            },
            trait_adjustments: HashMap::from([("intense".to_string(), -0.5), ("cozy".to_string(), 0.3)]),
            explanation: "Dialing things back — less intensity, more comfort.",
        },
        RefinementStrategy::NotIntenseEnough => RefinementDelta {
            filter_overlay: FilterPredicate::default(),
            trait_adjustments: HashMap::from([("intense".to_string(), 0.5), ("energy_energized".to_string(), 0.3)]),
            explanation: "Turning it up — more edge, more energy.",
        },
        RefinementStrategy::WrongEnergy => RefinementDelta {
            filter_overlay: FilterPredicate::default(),
            trait_adjustments: HashMap::from([("energy_neutral".to_string(), 0.4)]),
            explanation: "Recalibrating toward a steadier energy.",
        },
        RefinementStrategy::GenreMismatch => RefinementDelta {
            filter_overlay: FilterPredicate::default(),
            trait_adjustments: HashMap::from([("exploring".to_string(), 0.4)]),
            explanation: "Steering away from the genres that missed.",
        },
        RefinementStrategy::HiddenDesire => RefinementDelta {
            filter_overlay: FilterPredicate::default(),
            trait_adjustments: HashMap::from([("comfort".to_string(), 0.3), ("content".to_string(), 0.3)]),
            explanation: "Leaning further into what's already working.",
        },
        RefinementStrategy::NeedVariety => RefinementDelta {
            filter_overlay: FilterPredicate::default(),
            trait_adjustments: HashMap::from([("experimental".to_string(), 0.3), ("surprise".to_string(), 0.3)]),
            explanation: "Mixing it up with a wider spread.",
        },
    }
}
