use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// 1 (introductory) – 5 (advanced)
    pub difficulty: i32,
    /// Position within the module.
    #[sqlx(rename = "lesson_order")]
    pub order: i32,
    pub module: String,
    /// `quiz` or `coding`; decides which content collection the learner sees.
    #[serde(rename = "type")]
    pub lesson_type: String,
    /// Skill area used by the diagnostic-based recommendations.
    pub skill_area: Option<String>,
    /// Lesson ids that should be completed first.
    pub prerequisites: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub lesson_id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// One assertion run against the learner's code, with the message shown when it fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub test: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CodingExercise {
    pub id: i32,
    pub lesson_id: i32,
    pub title: String,
    pub description: String,
    pub initial_code: String,
    pub solution: String,
    pub test_cases: Json<Vec<TestCase>>,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ModulePrerequisite {
    pub id: i32,
    pub module_id: String,
    pub prerequisite_module_id: String,
    pub required: bool,
}

/// GET /api/lessons/:id payload. Both collections are always present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDetail {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub questions: Vec<Question>,
    pub coding_exercises: Vec<CodingExercise>,
}
