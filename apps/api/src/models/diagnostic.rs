use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const MIN_SKILL_LEVEL: i32 = 1;
pub const MAX_SKILL_LEVEL: i32 = 5;
/// Level assumed for a skill area the user has never been assessed in.
pub const NEUTRAL_SKILL_LEVEL: i32 = 3;
/// Confidence recorded when a skill level is first created.
pub const DEFAULT_CONFIDENCE: i32 = 70;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticQuiz {
    pub id: i32,
    pub topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub difficulty_level: i32,
    pub skill_area: String,
    /// How far one answer moves the skill level.
    pub weight: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserDiagnosticResponse {
    pub id: i32,
    pub user_id: i32,
    pub quiz_id: i32,
    pub answer: String,
    pub is_correct: bool,
    /// Seconds taken to answer, as reported by the client.
    pub response_time: Option<i32>,
    pub attempted_at: DateTime<Utc>,
}

/// Unique per (user_id, skill_area).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSkillLevel {
    pub id: i32,
    pub user_id: i32,
    pub skill_area: String,
    pub level: i32,
    pub confidence: i32,
    pub last_updated: DateTime<Utc>,
}

/// One answer in a submitted diagnostic batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticAnswer {
    pub quiz_id: i32,
    pub answer: String,
    #[serde(default)]
    pub response_time: Option<i32>,
}
