pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::recommend::handlers;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendation API
        .route("/api/v1/streams", get(handlers::handle_streams))
        .route("/api/v1/recommendations", post(handlers::handle_recommend))
        .route("/api/v1/skills/match", post(handlers::handle_skill_match))
        // Wizard API
        .route("/api/v1/wizard/options", get(wizard::handle_options))
        .route("/api/v1/wizard/step", post(wizard::handle_step))
        .fallback(not_found)
        .with_state(state)
}
