//! Retrieval query text (§4.4.1).

use super::ordered_selections;
use crate::types::{AnsweredQuestion, QuestionFlow};

/// Compose a natural-language query sentence from the trait clauses of each
/// answered option, in stable (question-ordinal) order. Total: an empty
/// answer set yields a generic fallback sentence, never an empty string.
#[must_use]
pub fn map_query(answers: &[AnsweredQuestion], flow: &QuestionFlow) -> String {
    let selections = ordered_selections(answers, flow);
    if selections.is_empty() {
        return "Looking for something good to watch.".to_string();
    }

    let clauses: Vec<String> = selections
        .iter()
        .filter_map(|(_, option)| dominant_trait_clause(option))
        .collect();

    if clauses.is_empty() {
        return "Looking for something good to watch.".to_string();
    }

    format!("Looking for something {}.", clauses.join(", "))
}

/// The option's single highest-weighted trait, rendered as a word clause
/// (`energy_drained` -> `energy drained`). Ties broken by trait name so the
/// result is deterministic regardless of `HashMap` iteration order.
fn dominant_trait_clause(option: &crate::types::QuestionOption) -> Option<String> {
    option
        .traits
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Context, DayClass, FlowName, Question, QuestionOption, Season, TimeOfDay};
    use std::collections::HashMap;

    fn flow_with_one_question() -> QuestionFlow {
        QuestionFlow {
            greeting: String::new(),
            questions: vec![Question {
                id: "energy_level".to_string(),
                ordinal: 0,
                prompt: String::new(),
                description: String::new(),
                options: vec![QuestionOption {
                    id: "drained".to_string(),
                    text: "Pretty drained".to_string(),
                    traits: HashMap::from([("energy_drained".to_string(), 1.0)]),
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
    fn empty_answers_yield_fallback_sentence() {
        let flow = flow_with_one_question();
        assert_eq!(map_query(&[], &flow), "Looking for something good to watch.");
    }

    #[test]
    fn single_answer_composes_its_dominant_trait() {
        let flow = flow_with_one_question();
        let answers = vec![AnsweredQuestion {
            question_id: "energy_level".to_string(),
            option_id: "drained".to_string(),
            responded_at: chrono::Utc::now(),
            response_time_ms: None,
        }];
        assert_eq!(map_query(&answers, &flow), "Looking for something energy drained.");
    }
}
