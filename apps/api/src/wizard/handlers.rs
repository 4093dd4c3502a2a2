//! Axum route handlers for the intake wizard.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::stream_filter::SELECTABLE_STREAMS;
use crate::errors::AppError;
use crate::recommend::handlers::recommend_for;
use crate::recommend::report::CareerReport;
use crate::state::AppState;
use crate::wizard::session::{
    WizardAction, WizardSession, WizardStep, AGE_GROUPS, EDUCATION_LEVELS,
};

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    /// Absent on the first call; a fresh session is started.
    #[serde(default)]
    pub session: Option<WizardSession>,
    #[serde(flatten)]
    pub action: WizardAction,
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub session: WizardSession,
    pub step_number: u8,
    pub report: Option<CareerReport>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub age_groups: Vec<String>,
    pub education_levels: Vec<String>,
    pub streams: Vec<String>,
}

/// GET /api/v1/wizard/options
pub async fn handle_options() -> Json<OptionsResponse> {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    Json(OptionsResponse {
        age_groups: owned(AGE_GROUPS),
        education_levels: owned(EDUCATION_LEVELS),
        streams: owned(SELECTABLE_STREAMS),
    })
}

/// POST /api/v1/wizard/step
///
/// Applies one action to the client's session. When the session lands on the
/// results step the report is computed and returned alongside it.
pub async fn handle_step(
    State(state): State<AppState>,
    Json(req): Json<StepRequest>,
) -> Result<Json<StepResponse>, AppError> {
    let current = req.session.unwrap_or_default();
    let session = current.apply(req.action)?;
    debug!(
        session_id = %session.session_id,
        step = session.step.number(),
        "wizard advanced"
    );

    let report = match session.step {
        WizardStep::Results => Some(recommend_for(&state, &session.to_query()).await?),
        _ => None,
    };

    Ok(Json(StepResponse {
        step_number: session.step.number(),
        session,
        report,
    }))
}
