use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::lesson::Lesson;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecommendation {
    pub id: i32,
    pub user_id: i32,
    pub lesson_id: i32,
    pub score: i32,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A lesson joined with the score and reason it was recommended for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedLesson {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub recommendation_score: i32,
    pub recommendation_reason: String,
}
