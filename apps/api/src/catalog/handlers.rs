use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::parse_lesson_id;
use crate::errors::AppError;
use crate::models::lesson::{Lesson, LessonDetail};
use crate::state::AppState;

/// GET /api/lessons
pub async fn handle_list_lessons(
    State(state): State<AppState>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    Ok(Json(state.store.list_lessons().await?))
}

/// GET /api/lessons/:id
pub async fn handle_get_lesson(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<LessonDetail>, AppError> {
    let lesson_id = parse_lesson_id(&raw_id)?;
    let lesson = state
        .store
        .find_lesson(lesson_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lesson not found".to_string()))?;

    let (questions, coding_exercises) = tokio::try_join!(
        state.store.lesson_questions(lesson_id),
        state.store.lesson_exercises(lesson_id),
    )?;

    Ok(Json(LessonDetail {
        lesson,
        questions,
        coding_exercises,
    }))
}
