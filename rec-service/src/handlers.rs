//! One function per route (§6), each a thin translation between the DTO
//! layer and the Orchestrator's typed outcomes.

use crate::app::AppState;
use crate::dto::{
    supported_domains, AdjustRequest, AdjustResponse, AnswerRequest, AnswerResponse,
    InteractionRequest, InteractionResponse, NextQuestionBody, Progress, RecommendationsBody,
    RefineRequest, RefineResponse, StartRequest, StartResponse,
};
use crate::error::ServiceError;
use axum::extract::{Path, State};
use axum::Json;
use rec_core::orchestrator::all_quick_adjustments;
use rec_core::orchestrator::AnswerOutcome;
use rec_core::refine::{ReactionInput, RefinementRequest};
use rec_core::types::FlowName;
use uuid::Uuid;

pub async fn start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartResponse>, ServiceError> {
    let domain = request.domain.unwrap_or_default();
    let flow_name = request
        .flow
        .as_deref()
        .map(FlowName::parse_or_standard)
        .unwrap_or(FlowName::Standard);
    let context = request.context.unwrap_or_default();

    let outcome = state.orchestrator.start(domain, flow_name, context).await?;

    Ok(Json(StartResponse {
        session_id: outcome.session_id,
        domain: outcome.domain,
        greeting: outcome.greeting,
        question: outcome.question,
        progress: Progress::from(outcome.progress),
        flow_type: outcome.flow_type,
        context: outcome.context,
    }))
}

pub async fn answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ServiceError> {
    let outcome = state
        .orchestrator
        .answer(session_id, request.question_id, request.answer, request.response_time)
        .await?;

    let response = match outcome {
        AnswerOutcome::NextQuestion { question, progress } => {
            AnswerResponse::NextQuestion(NextQuestionBody {
                question,
                progress: Progress::from(progress),
            })
        }
        AnswerOutcome::Recommendations(result) => AnswerResponse::Recommendations(RecommendationsBody {
            kind: "recommendations",
            recommendations: result.items,
            moment: result.moment,
            validation: result.validation,
            can_refine: result.can_refine,
            quick_adjustments: result.quick_adjustments,
        }),
    };

    Ok(Json(response))
}

pub async fn refine(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<RefineResponse>, ServiceError> {
    if let Some(name) = &request.quick_adjust {
        rec_core::adjust::adjustment_for(name).map_err(ServiceError::from)?;
    }

    let refinement_request = RefinementRequest {
        reactions: request
            .feedback
            .into_iter()
            .map(|item| ReactionInput {
                item_id: item.movie_id,
                reaction: item.reaction,
                tags: item.tags,
                text: item.text,
            })
            .collect(),
        action: request.action,
    };

    let outcome = state.orchestrator.refine(session_id, refinement_request).await?;

    Ok(Json(RefineResponse {
        kind: "refined_recommendations",
        recommendations: outcome.items,
        strategy: outcome.strategy,
        confidence: outcome.confidence,
        explanation: outcome.explanation,
        adjustments: all_quick_adjustments(),
        validation: outcome.validation,
    }))
}

pub async fn adjust(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, ServiceError> {
    let outcome = state.orchestrator.adjust(session_id, &request.adjustment_type).await?;

    let delta = rec_core::adjust::adjustment_for(&request.adjustment_type).map_err(ServiceError::from)?;
    let adjustment_applied = match delta.query_suffix {
        Some(suffix) => format!("{}: {suffix}", request.adjustment_type),
        None => request.adjustment_type.clone(),
    };

    Ok(Json(AdjustResponse {
        kind: "adjusted_recommendations",
        adjustment: outcome.adjustment,
        recommendations: outcome.items,
        adjustment_applied,
    }))
}

pub async fn interaction(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<InteractionRequest>,
) -> Result<Json<InteractionResponse>, ServiceError> {
    state
        .orchestrator
        .record_interaction(session_id, &request.movie_id, &request.interaction_type, request.metadata)
        .await?;

    Ok(Json(InteractionResponse {
        success: true,
        message: "interaction recorded".to_string(),
    }))
}

pub async fn moment(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<rec_core::types::MomentSummary>, ServiceError> {
    let summary = state.orchestrator.moment(session_id).await?;
    Ok(Json(summary))
}

pub async fn domains() -> Json<Vec<crate::dto::DomainEntry>> {
    Json(supported_domains())
}
