//! The built-in question set (§4.1): guaranteed reachable without I/O, used
//! whenever the persistent catalog store is unavailable.

use crate::types::{Domain, Question, QuestionOption};
use std::collections::HashMap;

fn opt(id: &str, text: &str, traits: &[(&str, f32)]) -> QuestionOption {
    QuestionOption {
        id: id.to_string(),
        text: text.to_string(),
        traits: traits.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
        filter_hints: Default::default(),
    }
}

fn q(id: &str, ordinal: u32, prompt: &str, description: &str, options: Vec<QuestionOption>) -> Question {
    Question {
        id: id.to_string(),
        ordinal,
        prompt: prompt.to_string(),
        description: description.to_string(),
        options,
    }
}

/// The fixed, built-in question set for a domain. Always constructible, never
/// empty, regardless of any external I/O (§4.1).
#[must_use]
pub fn builtin_questions(domain: Domain) -> Vec<Question> {
    match domain {
        Domain::Movies => movies_questions(),
        Domain::TvSeries => tv_series_questions(),
        Domain::Documentaries => documentaries_questions(),
    }
}

fn movies_questions() -> Vec<Question> {
    vec![
        q(
            "energy_level",
            0,
            "How's your energy right now?",
            "Helps us gauge how much you want a film to ask of you.",
            vec![
                opt("drained", "Pretty drained", &[("energy_drained", 1.0), ("cozy", 0.6)]),
                opt("steady", "Steady, nothing wild", &[("energy_neutral", 1.0)]),
                opt("wired", "Wired and ready", &[("energy_energized", 1.0), ("intense", 0.5)]),
            ],
        ),
        q(
            "mood",
            1,
            "What mood are you chasing?",
            "There's no wrong answer — just the honest one.",
            vec![
                opt("reflective", "Something reflective", &[("melancholic", 1.0), ("slow_burn", 0.4)]),
                opt("feel_good", "Feel-good and warm", &[("content", 1.0), ("comfort", 0.6)]),
                opt("thrill", "Give me a thrill", &[("adventurous", 1.0), ("intense", 0.4)]),
            ],
        ),
        q(
            "openness",
            2,
            "How adventurous are you feeling with the pick?",
            "Tell us how far off the beaten path we can go.",
            vec![
                opt("familiar", "Keep it familiar", &[("comfort_zone", 1.0)]),
                opt("curious", "I'm curious", &[("exploring", 1.0)]),
                opt("wild_card", "Surprise me completely", &[("experimental", 1.0), ("surprise", 0.7)]),
            ],
        ),
        q(
            "attention",
            3,
            "How much attention can you give it?",
            "This shapes how demanding a film we suggest.",
            vec![
                opt("background", "It's on in the background", &[("scattered", 1.0)]),
                opt("half_focused", "Half my attention", &[("present", 0.6)]),
                opt("locked_in", "Fully locked in", &[("immersed", 1.0)]),
            ],
        ),
        q(
            "company",
            4,
            "Watching solo, or with company?",
            "A small nudge on tone, not a hard filter.",
            vec![
                opt("solo", "Just me", &[("present", 0.3)]),
                opt("partner", "With a partner", &[("content", 0.3)]),
                opt("group", "A group", &[("adventurous", 0.3)]),
            ],
        ),
    ]
}

fn tv_series_questions() -> Vec<Question> {
    vec![
        q(
            "commitment",
            0,
            "How many seasons are you up for?",
            "Sets how big a commitment we recommend.",
            vec![
                opt("short", "Something short, under a season", &[("scattered", 0.4)]),
                opt("medium", "A season or two is fine", &[("present", 0.6)]),
                opt("long", "I'll binge for weeks", &[("immersed", 1.0)]),
            ],
        ),
        q(
            "tone",
            1,
            "What tone are you after?",
            "There's no wrong answer — just the honest one.",
            vec![
                opt("light", "Light and easy", &[("content", 1.0)]),
                opt("dark", "Dark and gripping", &[("adventurous", 0.7), ("intense", 0.6)]),
                opt("melancholy", "Quietly sad", &[("melancholic", 1.0)]),
            ],
        ),
        q(
            "openness",
            2,
            "How far off the beaten path can we go?",
            "Tell us how experimental the pick can be.",
            vec![
                opt("familiar", "Keep it familiar", &[("comfort_zone", 1.0)]),
                opt("curious", "I'm curious", &[("exploring", 1.0)]),
                opt("wild_card", "Surprise me completely", &[("experimental", 1.0), ("surprise", 0.7)]),
            ],
        ),
    ]
}

fn documentaries_questions() -> Vec<Question> {
    vec![
        q(
            "subject",
            0,
            "What pulls you in right now?",
            "Helps us pick a subject, not just a style.",
            vec![
                opt("nature", "The natural world", &[("content", 0.6)]),
                opt("true_crime", "True crime", &[("adventurous", 0.6), ("intense", 0.6)]),
                opt("history", "History", &[("present", 0.6)]),
                opt("science", "Science", &[("immersed", 0.6)]),
            ],
        ),
        q(
            "energy_level",
            1,
            "How's your energy right now?",
            "Helps us gauge how much the film should ask of you.",
            vec![
                opt("drained", "Pretty drained", &[("energy_drained", 1.0)]),
                opt("steady", "Steady, nothing wild", &[("energy_neutral", 1.0)]),
                opt("wired", "Wired and ready", &[("energy_energized", 1.0)]),
            ],
        ),
        q(
            "openness",
            2,
            "How far off the beaten path can we go?",
            "Tell us how experimental the pick can be.",
            vec![
                opt("familiar", "Keep it familiar", &[("comfort_zone", 1.0)]),
                opt("curious", "I'm curious", &[("exploring", 1.0)]),
                opt("wild_card", "Surprise me completely", &[("experimental", 1.0), ("surprise", 0.7)]),
            ],
        ),
    ]
}

/// Lookup map form, occasionally useful for flow re-templating (§4.2).
#[must_use]
pub fn builtin_by_id(domain: Domain) -> HashMap<String, Question> {
    builtin_questions(domain)
        .into_iter()
        .map(|q| (q.id.clone(), q))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_domain_has_a_non_empty_builtin_set() {
        for domain in Domain::all() {
            let qs = builtin_questions(*domain);
            assert!(!qs.is_empty(), "{domain:?} must have builtin questions");
        }
    }

    #[test]
    fn ordinals_are_stable_and_sequential() {
        let qs = builtin_questions(Domain::Movies);
        for (i, q) in qs.iter().enumerate() {
            assert_eq!(q.ordinal as usize, i);
        }
    }
}
