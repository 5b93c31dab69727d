//! Quick-Adjust Engine (C12, §4.12).
//!
//! A closed set of named adjustments, each mapping to a query-text suffix
//! and/or a filter delta. The Orchestrator re-runs the pipeline from C4
//! onward with the delta applied; this module only decides what the delta
//! *is*.

use crate::error::{Error, Result};
use crate::types::{AdjustmentType, FilterPredicate};
use std::str::FromStr;

/// The delta a named adjustment contributes.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentDelta {
    pub query_suffix: Option<&'static str>,
    pub filter_delta: FilterPredicate,
}

/// Look up the delta for `name`. Unknown names are a typed validation error
/// (§4.12), not a silent default.
pub fn adjustment_for(name: &str) -> Result<AdjustmentDelta> {
    let adjustment = AdjustmentType::from_str(name)
        .map_err(|()| Error::Validation(format!("unknown adjustment: {name}")))?;

    Ok(match adjustment {
        AdjustmentType::Lighter => AdjustmentDelta {
            query_suffix: Some("but lighter and more positive"),
            filter_delta: FilterPredicate::default(),
        },
        AdjustmentType::Deeper => AdjustmentDelta {
            query_suffix: Some("but more profound and meaningful"),
            filter_delta: FilterPredicate::default(),
        },
        AdjustmentType::Weirder => AdjustmentDelta {
            query_suffix: Some("but more unusual and unexpected"),
            filter_delta: FilterPredicate::default(),
        },
        AdjustmentType::Safer => AdjustmentDelta {
            query_suffix: Some("but more familiar and comfortable"),
            filter_delta: FilterPredicate::default(),
        },
        AdjustmentType::Shorter => AdjustmentDelta {
            query_suffix: None,
            filter_delta: FilterPredicate {
                max_runtime_minutes: Some(100),
                ..FilterPredicate::default()
            },
        },
        AdjustmentType::Longer => AdjustmentDelta {
            query_suffix: None,
            filter_delta: FilterPredicate {
                min_runtime_minutes: Some(150),
                ..FilterPredicate::default()
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_a_validation_error() {
        let result = adjustment_for("bogus");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn shorter_caps_runtime_at_100() {
        let delta = adjustment_for("shorter").unwrap();
        assert_eq!(delta.filter_delta.max_runtime_minutes, Some(100));
    }

    #[test]
    fn lighter_carries_the_documented_suffix() {
        let delta = adjustment_for("lighter").unwrap();
        assert_eq!(delta.query_suffix, Some("but lighter and more positive"));
    }
}
