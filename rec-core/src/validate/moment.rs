//! Moment summary (§4.10): a short human-readable snapshot of the profile,
//! alongside a 5-axis radar payload for display.

use crate::types::{EmotionalProfile, Energy, Focus, Mood, MomentSummary, Openness, RadarPayload};

#[must_use]
pub fn moment_summary(profile: &EmotionalProfile, confidence: f32) -> MomentSummary {
    let radar = RadarPayload {
        energy: energy_value(profile.energy),
        mood: mood_value(profile.mood),
        openness: openness_value(profile.openness),
        focus: focus_value(profile.focus),
        confidence: confidence.clamp(0.0, 1.0),
    };

    MomentSummary {
        description: describe(profile),
        emoji: emoji_for(profile),
        confidence_percent: (confidence.clamp(0.0, 1.0) * 100.0).round() as u8,
        radar,
    }
}

fn energy_value(energy: Energy) -> f32 {
    match energy {
        Energy::Drained => 0.0,
        Energy::Neutral => 0.5,
        Energy::Energized => 1.0,
    }
}

fn mood_value(mood: Mood) -> f32 {
    match mood {
        Mood::Melancholic => 0.0,
        Mood::Content => 0.5,
        Mood::Adventurous => 1.0,
    }
}

fn openness_value(openness: Openness) -> f32 {
    match openness {
        Openness::ComfortZone => 0.0,
        Openness::Exploring => 0.5,
        Openness::Experimental => 1.0,
    }
}

fn focus_value(focus: Focus) -> f32 {
    match focus {
        Focus::Scattered => 0.0,
        Focus::Present => 0.5,
        Focus::Immersed => 1.0,
    }
}

fn describe(profile: &EmotionalProfile) -> String {
    let energy = match profile.energy {
        Energy::Drained => "low-energy",
        Energy::Neutral => "steady",
        Energy::Energized => "high-energy",
    };
    let mood = match profile.mood {
        Mood::Melancholic => "reflective",
        Mood::Content => "warm",
        Mood::Adventurous => "restless",
    };
    format!("A {energy}, {mood} moment.")
}

fn emoji_for(profile: &EmotionalProfile) -> String {
    match (profile.energy, profile.mood) {
        (Energy::Drained, _) => "😌".to_string(),
        (_, Mood::Adventurous) => "🔥".to_string(),
        (_, Mood::Melancholic) => "🌧️".to_string(),
        _ => "🙂".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radar_axes_are_within_unit_range() {
        let summary = moment_summary(&EmotionalProfile::default(), 0.8);
        assert!((0.0..=1.0).contains(&summary.radar.energy));
        assert!((0.0..=1.0).contains(&summary.radar.confidence));
    }

    #[test]
    fn confidence_percent_rounds_to_whole_number() {
        let summary = moment_summary(&EmotionalProfile::default(), 0.876);
        assert_eq!(summary.confidence_percent, 88);
    }
}
