//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::stream_filter::SELECTABLE_STREAMS;
use crate::errors::AppError;
use crate::models::QueryContext;
use crate::recommend::report::{build_report, CareerReport};
use crate::recommend::skill_match::{skill_match, SkillMatch};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SkillMatchRequest {
    pub user_skills: String,
    pub technology_skills: String,
}

#[derive(Debug, Serialize)]
pub struct SkillMatchResponse {
    #[serde(flatten)]
    pub result: SkillMatch,
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StreamEntry {
    pub stream: String,
    pub related: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub selectable: Vec<String>,
    pub adjacency: Vec<StreamEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Runs the configured ranker and builds the report. Shared with the wizard.
pub async fn recommend_for(state: &AppState, query: &QueryContext) -> Result<CareerReport, AppError> {
    let ranked = state.ranker.rank(query).await?;
    info!(
        strategy = state.ranker.strategy(),
        results = ranked.len(),
        "recommendations computed"
    );
    Ok(build_report(state.ranker.strategy(), ranked, &query.skills))
}

/// POST /api/v1/recommendations
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(query): Json<QueryContext>,
) -> Result<Json<CareerReport>, AppError> {
    Ok(Json(recommend_for(&state, &query).await?))
}

/// POST /api/v1/skills/match
pub async fn handle_skill_match(
    Json(req): Json<SkillMatchRequest>,
) -> Result<Json<SkillMatchResponse>, AppError> {
    let result = skill_match(&req.user_skills, &req.technology_skills);
    let missing = result.missing();
    Ok(Json(SkillMatchResponse { result, missing }))
}

/// GET /api/v1/streams
pub async fn handle_streams(State(state): State<AppState>) -> Json<StreamsResponse> {
    let adjacency = state
        .adjacency
        .entries()
        .into_iter()
        .map(|(stream, related)| StreamEntry {
            stream: stream.to_string(),
            related: related.iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    Json(StreamsResponse {
        selectable: SELECTABLE_STREAMS.iter().map(|s| s.to_string()).collect(),
        adjacency,
    })
}
