//! Router assembly and shared state (§6). A single permissive CORS layer
//! stands in for the fuller CORS/auth/rate-limiting layer described as out
//! of depth-scope for this core; the collaborator layer is expected to
//! front this service with whatever policy a deployment needs.

use crate::handlers;
use axum::routing::{get, post};
use axum::Router;
use rec_core::Orchestrator;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    #[must_use]
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Assemble the seven routes from §6 over `state`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/start", post(handlers::start))
        .route("/answer/{session_id}", post(handlers::answer))
        .route("/refine/{session_id}", post(handlers::refine))
        .route("/adjust/{session_id}", post(handlers::adjust))
        .route("/interaction/{session_id}", post(handlers::interaction))
        .route("/moment/{session_id}", get(handlers::moment))
        .route("/domains", get(handlers::domains))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
