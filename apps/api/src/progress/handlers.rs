use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::CurrentUser;
use crate::catalog::parse_lesson_id;
use crate::errors::AppError;
use crate::extractors::AppJson;
use crate::models::progress::UserProgress;
use crate::progress::tracker::normalize_score;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgressSubmission {
    /// Kept loose so a non-numeric score is a 400, not a body rejection.
    #[serde(default)]
    pub score: Value,
}

/// GET /api/progress
pub async fn handle_list_progress(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<UserProgress>>, AppError> {
    Ok(Json(state.store.user_progress(current.user.id).await?))
}

/// POST /api/progress/:lesson_id
pub async fn handle_record_progress(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(raw_id): Path<String>,
    body: Result<AppJson<ProgressSubmission>, AppError>,
) -> Result<Json<Value>, AppError> {
    let lesson_id = parse_lesson_id(&raw_id)?;
    // An unreadable body carries no score either.
    let score = body
        .ok()
        .and_then(|AppJson(body)| body.score.as_f64())
        .map(normalize_score)
        .ok_or_else(|| AppError::Validation("Invalid score".to_string()))?;

    if state.store.find_lesson(lesson_id).await?.is_none() {
        return Err(AppError::NotFound("Lesson not found".to_string()));
    }

    let row = state
        .store
        .record_progress(current.user.id, lesson_id, score)
        .await?;
    info!(
        "User {} scored {score} on lesson {lesson_id} (best {}, completed {})",
        current.user.id, row.score, row.completed
    );

    Ok(Json(json!({ "message": "Progress updated" })))
}
