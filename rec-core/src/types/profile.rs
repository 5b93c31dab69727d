//! The Emotional Profile (§3).

use super::domain::{Energy, Focus, Mood, Openness};
use serde::{Deserialize, Serialize};

/// Four-axis categorical summary of the viewer's moment (§3), derived
/// deterministically from the answer set by the Preference Mapper (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalProfile {
    pub energy: Energy,
    pub mood: Mood,
    pub openness: Openness,
    pub focus: Focus,
}

impl Default for EmotionalProfile {
    /// Documented default when no answer informs a given axis (§4.4.3).
    fn default() -> Self {
        Self {
            energy: Energy::Neutral,
            mood: Mood::Content,
            openness: Openness::Exploring,
            focus: Focus::Present,
        }
    }
}

/// A radar-chart payload over the four profile axes plus overall confidence,
/// five axes total as required by the Validator's moment summary (§4.10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPayload {
    pub energy: f32,
    pub mood: f32,
    pub openness: f32,
    pub focus: f32,
    pub confidence: f32,
}

/// A short human-readable description of the current moment (§4.10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentSummary {
    pub description: String,
    pub emoji: String,
    pub confidence_percent: u8,
    pub radar: RadarPayload,
}
