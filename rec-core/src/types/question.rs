//! Question Catalog entities (§3, §4.1).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single selectable answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    /// Identifier unique within its question.
    pub id: String,
    pub text: String,
    /// Trait name -> weight in `[0, 1]`.
    pub traits: HashMap<String, f32>,
    /// Optional filter hints this option contributes (§4.4.2).
    #[serde(default)]
    pub filter_hints: OptionFilterHints,
}

/// Filter-predicate fragments an answer option can contribute (§4.4.2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionFilterHints {
    pub min_release_year: Option<u16>,
    pub max_release_year: Option<u16>,
    pub min_rating: Option<f32>,
    pub max_runtime_minutes: Option<u16>,
    pub min_vote_count: Option<u32>,
    pub min_popularity: Option<f32>,
    pub max_popularity: Option<f32>,
    #[serde(default)]
    pub include_genres: Vec<String>,
    #[serde(default)]
    pub exclude_genres: Vec<String>,
}

/// A single catalog question (§3, §4.1). Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable identifier, unique within a session.
    pub id: String,
    /// Ordinal position within its domain's flow, 0-based.
    pub ordinal: u32,
    pub prompt: String,
    pub description: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// A recorded answer within a session (§3 invariant a/b).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub option_id: String,
    pub responded_at: chrono::DateTime<chrono::Utc>,
    pub response_time_ms: Option<u64>,
}
