// Lesson catalog: the ordered lesson list and per-lesson detail
// (questions and coding exercises).

pub mod handlers;

use crate::errors::AppError;

/// Lesson ids in paths must be plain base-10 integers.
pub fn parse_lesson_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid lesson ID".to_string()))
}
