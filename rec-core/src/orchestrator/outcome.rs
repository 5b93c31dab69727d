//! Response shapes returned by the Orchestrator's public entry points,
//! mirroring the endpoint payloads in §6.

use crate::types::{
    AdjustmentType, Context, Domain, FlowName, Question, RecommendationItem, RefinementStrategy,
};
use crate::validate::ValidationScore;
use crate::types::MomentSummary;
use uuid::Uuid;

/// `POST /start` response (§6).
#[derive(Debug, Clone)]
pub struct StartOutcome {
    pub session_id: Uuid,
    pub domain: Domain,
    pub greeting: String,
    pub question: Option<Question>,
    pub progress: (usize, usize),
    pub flow_type: FlowName,
    pub context: Context,
}

/// A completed recommendation run: the shape both `/answer`'s completion
/// branch and the standalone recommend path produce.
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub items: Vec<RecommendationItem>,
    pub moment: MomentSummary,
    pub validation: ValidationScore,
    pub can_refine: bool,
    pub quick_adjustments: Vec<AdjustmentType>,
}

/// `POST /answer/{sessionId}` response (§6): either another question or the
/// completed recommendation set.
#[derive(Debug, Clone)]
pub enum AnswerOutcome {
    NextQuestion {
        question: Question,
        progress: (usize, usize),
    },
    Recommendations(RecommendationOutcome),
}

/// `POST /refine/{sessionId}` response (§6).
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    pub items: Vec<RecommendationItem>,
    pub strategy: RefinementStrategy,
    pub confidence: f32,
    pub explanation: String,
    pub validation: ValidationScore,
}

/// `POST /adjust/{sessionId}` response (§6).
#[derive(Debug, Clone)]
pub struct AdjustOutcome {
    pub adjustment: AdjustmentType,
    pub items: Vec<RecommendationItem>,
}

/// The closed set of quick adjustments always offered alongside a completed
/// recommendation set (§4.12).
#[must_use]
pub fn all_quick_adjustments() -> Vec<AdjustmentType> {
    vec![
        AdjustmentType::Lighter,
        AdjustmentType::Deeper,
        AdjustmentType::Weirder,
        AdjustmentType::Safer,
        AdjustmentType::Shorter,
        AdjustmentType::Longer,
    ]
}
