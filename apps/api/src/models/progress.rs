use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's best result on one lesson. Unique per (user_id, lesson_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: i32,
    pub user_id: i32,
    pub lesson_id: i32,
    pub completed: bool,
    pub score: i32,
    pub last_attempted: DateTime<Utc>,
}
