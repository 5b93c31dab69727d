//! Preference Mapper (C4, §4.4).
//!
//! Three pure, synchronous, total functions over the answer set: no
//! suspension points anywhere in this module (§5: "local computation ... is
//! non-suspending").

mod filters;
mod profile;
mod query;

pub use filters::map_filters;
pub use profile::map_profile;
pub use query::map_query;

use crate::types::{AnsweredQuestion, Question, QuestionFlow, QuestionOption};

/// Answered options in stable order (by the owning question's ordinal),
/// paired with the option they selected. Skips answers whose question or
/// option identifier is no longer present in the flow (defensive against a
/// flow reload between question and answer).
fn ordered_selections<'a>(
    answers: &[AnsweredQuestion],
    flow: &'a QuestionFlow,
) -> Vec<(&'a Question, &'a QuestionOption)> {
    let mut selections: Vec<(&Question, &QuestionOption)> = answers
        .iter()
        .filter_map(|answer| {
            let question = flow.questions.iter().find(|q| q.id == answer.question_id)?;
            let option = question.option(&answer.option_id)?;
            Some((question, option))
        })
        .collect();
    selections.sort_by_key(|(q, _)| q.ordinal);
    selections
}
