use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::diagnostic::QUIZ_SIZE;
use crate::errors::AppError;
use crate::extractors::AppJson;
use crate::models::diagnostic::{DiagnosticAnswer, DiagnosticQuiz};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DiagnosticSubmission {
    pub responses: Vec<DiagnosticAnswer>,
}

/// GET /api/diagnostic-quiz
pub async fn handle_get_quiz(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Vec<DiagnosticQuiz>>, AppError> {
    Ok(Json(state.store.sample_diagnostic_quiz(QUIZ_SIZE).await?))
}

/// POST /api/diagnostic-quiz/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(body): AppJson<DiagnosticSubmission>,
) -> Result<Json<Value>, AppError> {
    let user_id = current.user.id;
    let outcome = state
        .store
        .apply_diagnostic(user_id, &body.responses)
        .await?;

    if !outcome.skipped.is_empty() {
        warn!(
            "User {user_id} answered unknown diagnostic questions {:?}",
            outcome.skipped
        );
    }
    info!(
        "User {user_id} completed diagnostic: {} graded, {} skills updated, {} recommendations",
        outcome.responses.len(),
        outcome.skill_levels.len(),
        outcome.recommendations.len()
    );

    Ok(Json(json!({ "message": "Quiz completed successfully" })))
}
