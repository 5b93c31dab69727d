//! # rec-test-utils
//!
//! Shared fixture builders for the recommendation core's test suites.
//!
//! Provides:
//! - Question/option builders
//! - Candidate builders
//! - Session and context builders

use chrono::{DateTime, Utc};
use rec_core::types::{
    AnsweredQuestion, Candidate, Context, Domain, FlowName, OptionFilterHints, Question,
    QuestionFlow, QuestionOption, RequestContext, Session,
};
use std::collections::HashMap;
use uuid::Uuid;

/// A fixed instant used across fixtures so tests stay deterministic.
#[must_use]
pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-07-28T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Build a `QuestionOption` with a single trait weight, no filter hints.
#[must_use]
pub fn test_option(id: &str, text: &str, trait_name: &str, weight: f32) -> QuestionOption {
    let mut traits = HashMap::new();
    traits.insert(trait_name.to_string(), weight);
    QuestionOption {
        id: id.to_string(),
        text: text.to_string(),
        traits,
        filter_hints: OptionFilterHints::default(),
    }
}

/// Build a `QuestionOption` that also contributes a runtime filter hint.
#[must_use]
pub fn test_option_with_runtime_hint(
    id: &str,
    text: &str,
    trait_name: &str,
    weight: f32,
    max_runtime_minutes: u16,
) -> QuestionOption {
    let mut option = test_option(id, text, trait_name, weight);
    option.filter_hints.max_runtime_minutes = Some(max_runtime_minutes);
    option
}

/// Build a question with two options, `a` and `b`, over distinct traits.
#[must_use]
pub fn test_question(id: &str, ordinal: u32) -> Question {
    Question {
        id: id.to_string(),
        ordinal,
        prompt: format!("prompt for {id}"),
        description: format!("description for {id}"),
        options: vec![
            test_option("a", "Option A", "energy", 0.8),
            test_option("b", "Option B", "mood", 0.6),
        ],
    }
}

/// Build `count` questions with sequential ordinals and ids `q1..qN`.
#[must_use]
pub fn test_questions(count: usize) -> Vec<Question> {
    (1..=count).map(|n| test_question(&format!("q{n}"), (n - 1) as u32)).collect()
}

/// Build a `Candidate` with sensible defaults, overriding only what a test
/// cares about.
#[must_use]
pub fn test_candidate(id: &str, title: &str, genres: &[&str]) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        release_year: 2020,
        genres: genres.iter().map(|g| (*g).to_string()).collect(),
        quality_score: 0.8,
        popularity: 0.5,
        vote_count: 1000,
        runtime_minutes: 110,
        similarity: 0.7,
    }
}

/// A small, deterministic pool of candidates spanning several genres, useful
/// for exercising filtering, ranking, and diversity logic.
#[must_use]
pub fn test_candidate_pool() -> Vec<Candidate> {
    vec![
        test_candidate("c1", "Bright Horizon", &["comedy", "romance"]),
        test_candidate("c2", "Quiet Static", &["drama"]),
        test_candidate("c3", "Neon Chase", &["action", "thriller"]),
        test_candidate("c4", "Last Orbit", &["sci-fi"]),
        test_candidate("c5", "Salt and Smoke", &["drama", "thriller"]),
    ]
}

/// Build a resolved `Context` with every field filled from `test_now()`.
#[must_use]
pub fn test_context() -> Context {
    Context::resolve(&RequestContext::default(), test_now())
}

/// Build a fresh session for `domain` with `question_count` flow questions
/// and no answers yet.
#[must_use]
pub fn test_session(domain: Domain, question_count: usize) -> Session {
    let flow = QuestionFlow {
        greeting: "Let's find something great to watch.".to_string(),
        questions: test_questions(question_count),
        context: test_context(),
        flow_type: FlowName::Standard,
    };
    Session::new(domain, flow, test_now())
}

/// Build an `AnsweredQuestion` recorded at `test_now()`.
#[must_use]
pub fn test_answer(question_id: &str, option_id: &str) -> AnsweredQuestion {
    AnsweredQuestion {
        question_id: question_id.to_string(),
        option_id: option_id.to_string(),
        responded_at: test_now(),
        response_time_ms: Some(2500),
    }
}

/// A fresh, random session id, for tests that need an id with no session
/// backing it (e.g. exercising `SessionExpired`).
#[must_use]
pub fn unknown_session_id() -> Uuid {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_unanswered() {
        let session = test_session(Domain::Movies, 5);
        assert_eq!(session.progress(), (1, 5));
        assert!(!session.is_complete());
    }

    #[test]
    fn test_session_completes_after_all_questions_answered() {
        let mut session = test_session(Domain::Movies, 2);
        assert!(session.record_answer(test_answer("q1", "a")));
        assert!(session.record_answer(test_answer("q2", "b")));
        assert!(session.is_complete());
    }

    #[test]
    fn duplicate_answer_is_rejected_by_record_answer() {
        let mut session = test_session(Domain::Movies, 2);
        assert!(session.record_answer(test_answer("q1", "a")));
        assert!(!session.record_answer(test_answer("q1", "b")));
        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.answers[0].option_id, "a");
    }

    #[test]
    fn test_candidate_pool_has_distinct_ids() {
        let pool = test_candidate_pool();
        let ids: std::collections::HashSet<_> = pool.iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), pool.len());
    }
}
