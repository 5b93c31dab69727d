//! Request/response bodies for the seven external endpoints (§6). The core
//! types (`Question`, `RecommendationItem`, `MomentSummary`, `ValidationScore`,
//! ...) already carry the right `camelCase` wire format and are reused
//! directly; this module only adds the thin envelope shapes and the inbound
//! request bodies, centralizing the alias-normalization the design notes
//! call for at the collaborator boundary rather than scattering it through
//! handlers.

use rec_core::types::{
    AdjustmentType, Context, Domain, FlowName, MomentSummary, Question, RecommendationItem,
    RefinementAction, RequestContext, Reaction,
};
use rec_core::validate::ValidationScore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl From<(usize, usize)> for Progress {
    fn from((current, total): (usize, usize)) -> Self {
        Self { current, total }
    }
}

/// `POST /start` request body (§6). An absent `domain` defaults to movies,
/// matching [`Domain::default`]; an absent `flow` defaults to the standard
/// flow via [`FlowName::parse_or_standard`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(default)]
    pub domain: Option<Domain>,
    #[serde(default)]
    pub context: Option<RequestContext>,
    #[serde(default)]
    pub flow: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub session_id: Uuid,
    pub domain: Domain,
    pub greeting: String,
    pub question: Option<Question>,
    pub progress: Progress,
    pub flow_type: FlowName,
    pub context: Context,
}

/// `POST /answer/{sessionId}` request body (§6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: String,
    pub answer: String,
    #[serde(default)]
    pub response_time: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionBody {
    pub question: Question,
    pub progress: Progress,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub recommendations: Vec<RecommendationItem>,
    pub moment: MomentSummary,
    pub validation: ValidationScore,
    pub can_refine: bool,
    pub quick_adjustments: Vec<AdjustmentType>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnswerResponse {
    NextQuestion(NextQuestionBody),
    Recommendations(RecommendationsBody),
}

/// A single per-item reaction as submitted to `/refine` (§6): `movieId` is
/// the public alias for what the core calls a candidate/item id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub movie_id: String,
    pub reaction: Reaction,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// `POST /refine/{sessionId}` request body (§6). `quick_adjust`, when
/// present, is validated against the same closed adjustment vocabulary as
/// `/adjust` but does not otherwise change the refinement pipeline: the
/// Refinement Engine already derives its own strategy from `feedback`/
/// `action` (§4.11), and layering a second, independently-triggered
/// adjustment delta on top of that is out of scope for this core.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    #[serde(default)]
    pub feedback: Vec<FeedbackItem>,
    #[serde(default)]
    pub action: Option<RefinementAction>,
    #[serde(default)]
    pub quick_adjust: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub recommendations: Vec<RecommendationItem>,
    pub strategy: rec_core::types::RefinementStrategy,
    pub confidence: f32,
    pub explanation: String,
    pub adjustments: Vec<AdjustmentType>,
    pub validation: ValidationScore,
}

/// `POST /adjust/{sessionId}` request body (§6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustRequest {
    pub adjustment_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustResponse {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub adjustment: AdjustmentType,
    pub recommendations: Vec<RecommendationItem>,
    pub adjustment_applied: String,
}

/// `POST /interaction/{sessionId}` request body (§6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    pub movie_id: String,
    pub interaction_type: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionResponse {
    pub success: bool,
    pub message: String,
}

/// Static entry in the `GET /domains` list (§6).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEntry {
    pub id: Domain,
    pub label: &'static str,
}

#[must_use]
pub fn supported_domains() -> Vec<DomainEntry> {
    Domain::all()
        .iter()
        .map(|domain| DomainEntry {
            id: *domain,
            label: match domain {
                Domain::Movies => "Movies",
                Domain::TvSeries => "TV Series",
                Domain::Documentaries => "Documentaries",
            },
        })
        .collect()
}
