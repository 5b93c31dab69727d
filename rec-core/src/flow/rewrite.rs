//! Context-driven prompt rewriting (§4.2): question identifiers never
//! change, but a prompt's wording may flex with time-of-day, day class, or
//! season. The common case rewrites nothing and allocates nothing.

use crate::types::{Context, DayClass, Question, Season, TimeOfDay};
use std::borrow::Cow;

/// Rewrite a question's prompt for the given context, if this question has a
/// context-sensitive variant. Returns the original prompt unchanged otherwise.
#[must_use]
pub fn rewrite_prompt<'q>(question: &'q Question, context: &Context) -> Cow<'q, str> {
    match question.id.as_str() {
        "energy_level" if context.time_of_day == TimeOfDay::LateNight => {
            Cow::Borrowed("It's late — how's your energy holding up?")
        }
        "energy_level" if context.time_of_day == TimeOfDay::EarlyMorning => {
            Cow::Borrowed("Early start — how's your energy this morning?")
        }
        "commitment" if context.day_class == DayClass::Weekend => {
            Cow::Borrowed("It's the weekend — how many seasons are you up for?")
        }
        "subject" if context.season == Season::Winter => {
            Cow::Borrowed("What pulls you in on a night like this?")
        }
        _ => Cow::Borrowed(question.prompt.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RequestContext;

    fn question(id: &str, prompt: &str) -> Question {
        Question {
            id: id.to_string(),
            ordinal: 0,
            prompt: prompt.to_string(),
            description: String::new(),
            options: vec![],
        }
    }

    #[test]
    fn unrelated_question_is_never_rewritten() {
        let now = chrono::DateTime::parse_from_rfc3339("2026-07-28T23:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let ctx = Context::resolve(&RequestContext::default(), now);
        let q = question("mood", "What mood are you chasing?");
        assert_eq!(rewrite_prompt(&q, &ctx), Cow::Borrowed("What mood are you chasing?"));
    }

    #[test]
    fn energy_level_is_rewritten_late_at_night() {
        let now = chrono::DateTime::parse_from_rfc3339("2026-07-28T23:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let ctx = Context::resolve(&RequestContext::default(), now);
        let q = question("energy_level", "How's your energy right now?");
        assert_eq!(rewrite_prompt(&q, &ctx), "It's late — how's your energy holding up?");
    }

    #[test]
    fn identifiers_are_never_touched_by_rewriting() {
        let now = chrono::DateTime::parse_from_rfc3339("2026-07-28T23:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let ctx = Context::resolve(&RequestContext::default(), now);
        let q = question("energy_level", "How's your energy right now?");
        let _ = rewrite_prompt(&q, &ctx);
        assert_eq!(q.id, "energy_level");
    }
}
