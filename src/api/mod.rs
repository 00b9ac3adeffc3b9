pub mod health;
pub mod reward_cycle;
pub mod vortex;

use crate::orchestration::Orchestrator;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/vortex/calculation", get(vortex::get_vortex_calculation))
        .route("/v1/reward-cycle", get(reward_cycle::get_reward_cycle))
        .layer(cors)
        .with_state(state)
}

/// Treat a blank optional query parameter as absent.
pub(crate) fn non_empty(param: &Option<String>) -> Option<&str> {
    param.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
