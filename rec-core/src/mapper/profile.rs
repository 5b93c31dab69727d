//! Emotional Profile derivation (§4.4.3): each axis is a pure function of the
//! answer set, with a documented default when no answer informs that axis.

use super::ordered_selections;
use crate::types::{AnsweredQuestion, Energy, EmotionalProfile, Focus, Mood, Openness, QuestionFlow};

const ENERGY_TRAITS: &[(&str, Energy)] = &[
    ("energy_drained", Energy::Drained),
    ("energy_neutral", Energy::Neutral),
    ("energy_energized", Energy::Energized),
];

const MOOD_TRAITS: &[(&str, Mood)] = &[
    ("melancholic", Mood::Melancholic),
    ("content", Mood::Content),
    ("adventurous", Mood::Adventurous),
];

const OPENNESS_TRAITS: &[(&str, Openness)] = &[
    ("comfort_zone", Openness::ComfortZone),
    ("exploring", Openness::Exploring),
    ("experimental", Openness::Experimental),
];

const FOCUS_TRAITS: &[(&str, Focus)] = &[
    ("scattered", Focus::Scattered),
    ("present", Focus::Present),
    ("immersed", Focus::Immersed),
];

/// Derive the four-axis Emotional Profile from the answer set. Each axis
/// falls back to [`EmotionalProfile::default`]'s value for that axis when no
/// answered option carries a recognized trait for it.
#[must_use]
pub fn map_profile(answers: &[AnsweredQuestion], flow: &QuestionFlow) -> EmotionalProfile {
    let default = EmotionalProfile::default();
    let selections = ordered_selections(answers, flow);

    let traits: Vec<(&str, f32)> = selections
        .iter()
        .flat_map(|(_, option)| option.traits.iter().map(|(k, v)| (k.as_str(), *v)))
        .collect();

    EmotionalProfile {
        energy: dominant_axis(&traits, ENERGY_TRAITS).unwrap_or(default.energy),
        mood: dominant_axis(&traits, MOOD_TRAITS).unwrap_or(default.mood),
        openness: dominant_axis(&traits, OPENNESS_TRAITS).unwrap_or(default.openness),
        focus: dominant_axis(&traits, FOCUS_TRAITS).unwrap_or(default.focus),
    }
}

/// Highest-weighted trait in `traits` that names one of `axis_traits`' keys,
/// broken deterministically by iteration order of `axis_traits` on exact ties.
fn dominant_axis<T: Copy>(traits: &[(&str, f32)], axis_traits: &[(&str, T)]) -> Option<T> {
    axis_traits
        .iter()
        .filter_map(|(name, value)| {
            traits
                .iter()
                .filter(|(trait_name, _)| trait_name == name)
                .map(|(_, weight)| *weight)
                .fold(None, |acc: Option<f32>, w| Some(acc.map_or(w, |a| a.max(w))))
                .map(|weight| (weight, *value))
        })
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Context, DayClass, FlowName, Question, QuestionOption, Season, TimeOfDay};
    use std::collections::HashMap;

    fn flow() -> QuestionFlow {
        QuestionFlow {
            greeting: String::new(),
            questions: vec![Question {
                id: "mood".to_string(),
                ordinal: 0,
                prompt: String::new(),
                description: String::new(),
                options: vec![QuestionOption {
                    id: "thrill".to_string(),
                    text: String::new(),
                    traits: HashMap::from([("adventurous".to_string(), 1.0)]),
                    filter_hints: Default::default(),
                }],
            }],
            context: Context {
                time_of_day: TimeOfDay::Afternoon,
                day_class: DayClass::Weekday,
                season: Season::Summer,
                timezone: "UTC".to_string(),
                attention_level: None,
                discovery_mode: None,
                personal_context: None,
            },
            flow_type: FlowName::Standard,
        }
    }

    #[test]
    fn no_answers_yields_documented_defaults() {
        let profile = map_profile(&[], &flow());
        assert_eq!(profile, EmotionalProfile::default());
    }

    #[test]
    fn answer_moves_its_axis_only() {
        let answers = vec![AnsweredQuestion {
            question_id: "mood".to_string(),
            option_id: "thrill".to_string(),
            responded_at: chrono::Utc::now(),
            response_time_ms: None,
        }];
        let profile = map_profile(&answers, &flow());
        assert_eq!(profile.mood, Mood::Adventurous);
        assert_eq!(profile.energy, EmotionalProfile::default().energy);
    }
}
