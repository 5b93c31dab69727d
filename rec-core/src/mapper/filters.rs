//! Filter Predicate assembly (§4.4.2).

use super::ordered_selections;
use crate::types::{
    AnsweredQuestion, AttentionLevel, Context, DiscoveryMode, FilterPredicate, OptionFilterHints,
    PersonalContext, QuestionFlow, TimeOfDay,
};

/// Assemble the conjunction of option-level filter hints and context rules.
/// Total: an empty answer set with a bare context still yields a valid
/// (possibly unconstrained) predicate.
#[must_use]
pub fn map_filters(answers: &[AnsweredQuestion], flow: &QuestionFlow, context: &Context) -> FilterPredicate {
    let mut predicate = FilterPredicate::default();

    for (_, option) in ordered_selections(answers, flow) {
        predicate = predicate.tighten(&from_option_hints(&option.filter_hints));
    }

    predicate.tighten(&context_predicate(context))
}

fn from_option_hints(hints: &OptionFilterHints) -> FilterPredicate {
    FilterPredicate {
        min_release_year: hints.min_release_year,
        max_release_year: hints.max_release_year,
        min_rating: hints.min_rating,
        min_runtime_minutes: None,
        max_runtime_minutes: hints.max_runtime_minutes,
        min_vote_count: hints.min_vote_count,
        min_popularity: hints.min_popularity,
        max_popularity: hints.max_popularity,
        include_genres: hints.include_genres.iter().cloned().collect(),
        exclude_genres: hints.exclude_genres.iter().cloned().collect(),
    }
}

/// The fixed context rules named in §4.4.2.
fn context_predicate(context: &Context) -> FilterPredicate {
    let mut predicate = FilterPredicate::default();

    match context.attention_level {
        Some(AttentionLevel::Background) => predicate.max_runtime_minutes = Some(120),
        Some(AttentionLevel::FullFocus) => predicate.min_rating = Some(7.0),
        Some(AttentionLevel::Casual) | None => {}
    }

    match context.discovery_mode {
        Some(DiscoveryMode::Reliable) => {
            predicate.min_rating = Some(predicate.min_rating.map_or(6.5, |v| v.max(6.5)));
            predicate.min_vote_count = Some(100);
        }
        Some(DiscoveryMode::Surprise) => predicate.max_popularity = Some(50.0),
        Some(DiscoveryMode::Balanced) | None => {}
    }

    if context.personal_context == Some(PersonalContext::Escaping) {
        predicate.exclude_genres.insert("documentary".to_string());
        predicate.exclude_genres.insert("biography".to_string());
    }

    if context.time_of_day == TimeOfDay::LateNight {
        predicate.max_runtime_minutes = Some(
            predicate
                .max_runtime_minutes
                .map_or(150, |v| v.min(150)),
        );
    }

    predicate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayClass, FlowName, Season};

    fn bare_context() -> Context {
        Context {
            time_of_day: TimeOfDay::Afternoon,
            day_class: DayClass::Weekday,
            season: Season::Summer,
            timezone: "UTC".to_string(),
            attention_level: None,
            discovery_mode: None,
            personal_context: None,
        }
    }

    fn empty_flow() -> QuestionFlow {
        QuestionFlow {
            greeting: String::new(),
            questions: vec![],
            context: bare_context(),
            flow_type: FlowName::Standard,
        }
    }

    #[test]
    fn no_answers_and_bare_context_is_unconstrained() {
        let predicate = map_filters(&[], &empty_flow(), &bare_context());
        assert_eq!(predicate, FilterPredicate::default());
    }

    #[test]
    fn background_attention_caps_runtime() {
        let context = Context {
            attention_level: Some(AttentionLevel::Background),
            ..bare_context()
        };
        let predicate = map_filters(&[], &empty_flow(), &context);
        assert_eq!(predicate.max_runtime_minutes, Some(120));
    }

    #[test]
    fn reliable_discovery_sets_min_rating_and_vote_count() {
        let context = Context {
            discovery_mode: Some(DiscoveryMode::Reliable),
            ..bare_context()
        };
        let predicate = map_filters(&[], &empty_flow(), &context);
        assert_eq!(predicate.min_rating, Some(6.5));
        assert_eq!(predicate.min_vote_count, Some(100));
    }

    #[test]
    fn late_night_caps_runtime_at_150_unless_tighter() {
        let context = Context {
            time_of_day: TimeOfDay::LateNight,
            attention_level: Some(AttentionLevel::Background),
            ..bare_context()
        };
        let predicate = map_filters(&[], &empty_flow(), &context);
        assert_eq!(predicate.max_runtime_minutes, Some(120));
    }

    #[test]
    fn escaping_excludes_documentary_and_biography() {
        let context = Context {
            personal_context: Some(PersonalContext::Escaping),
            ..bare_context()
        };
        let predicate = map_filters(&[], &empty_flow(), &context);
        assert!(predicate.exclude_genres.contains("documentary"));
        assert!(predicate.exclude_genres.contains("biography"));
    }
}
