use axum::{extract::State, Json};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::recommendation::RecommendedLesson;
use crate::recommendation::attach_lessons;
use crate::recommendation::engine::recommend_from_progress;
use crate::state::AppState;

/// GET /api/recommendations
///
/// Recomputes from the learner's progress and replaces their stored set.
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<RecommendedLesson>>, AppError> {
    let user_id = current.user.id;
    let (lessons, progress, module_prerequisites) = tokio::try_join!(
        state.store.list_lessons(),
        state.store.user_progress(user_id),
        state.store.module_prerequisites(),
    )?;

    let picks = recommend_from_progress(&lessons, &progress, &module_prerequisites);
    state.store.replace_recommendations(user_id, &picks).await?;
    info!("Stored {} recommendations for user {user_id}", picks.len());

    Ok(Json(attach_lessons(&picks, &lessons)))
}
