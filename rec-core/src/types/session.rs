//! The Session entity and its lifecycle-adjacent types (§3).

use super::candidate::RecommendationItem;
use super::context::Context;
use super::domain::{Domain, FlowName, RefinementStrategy};
use super::profile::EmotionalProfile;
use super::question::{AnsweredQuestion, Question};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ordered question flow produced by the Flow Planner (§4.2) and snapshot
/// onto the Session at creation time so that ordinal numbering stays stable
/// for the lifetime of the session even if the catalog reloads (§4.1, §3
/// invariant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFlow {
    pub greeting: String,
    pub questions: Vec<Question>,
    pub context: Context,
    pub flow_type: FlowName,
}

/// One entry in a session's append-only refinement history (§3, §9: layered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementRecord {
    pub strategy: RefinementStrategy,
    pub confidence: f32,
    pub explanation: String,
    pub applied_at: DateTime<Utc>,
}

/// A stateful recommendation session (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub domain: Domain,
    pub flow: QuestionFlow,
    pub answers: Vec<AnsweredQuestion>,
    pub profile: Option<EmotionalProfile>,
    pub last_recommendations: Vec<RecommendationItem>,
    pub refinement_history: Vec<RefinementRecord>,
    pub created_at: DateTime<Utc>,
    pub last_touched_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(domain: Domain, flow: QuestionFlow, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain,
            flow,
            answers: Vec::new(),
            profile: None,
            last_recommendations: Vec::new(),
            refinement_history: Vec::new(),
            created_at: now,
            last_touched_at: now,
        }
    }

    /// Record an answer, idempotently (§3 invariant a, §8 properties):
    /// resubmission of an already-present question id is a silent no-op.
    /// Returns `true` if the answer was newly recorded.
    pub fn record_answer(&mut self, answer: AnsweredQuestion) -> bool {
        if self
            .answers
            .iter()
            .any(|a| a.question_id == answer.question_id)
        {
            return false;
        }
        self.answers.push(answer);
        true
    }

    /// The next unanswered question in flow order, if any.
    #[must_use]
    pub fn next_question(&self) -> Option<&Question> {
        self.flow
            .questions
            .iter()
            .find(|q| !self.answers.iter().any(|a| a.question_id == q.id))
    }

    /// 1-based "current question number" and total, e.g. `{current:1,total:5}`
    /// before any answer has been submitted (§8 scenario 1).
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let total = self.flow.questions.len();
        let current = (self.answers.len() + 1).min(total.max(1));
        (current, total)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.flow.questions.len()
    }
}
