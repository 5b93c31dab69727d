//! Refinement Engine (C11, §4.11).
//!
//! Turns a batch of per-item reactions (plus an optional named action) into
//! a [`RefinementStrategy`] and its deterministic delta. The Orchestrator
//! applies the delta's filter overlay on top of the session's current
//! mapper output and re-runs C5 through C10; this module only decides
//! *which* strategy and *what* delta, both pure functions of the input.

mod delta;
mod detect;

pub use delta::{delta_for, RefinementDelta};
pub use detect::{detect_strategy, RefinementRequest, ReactionInput};
