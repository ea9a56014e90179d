//! Persistence seam for the learning data.
//!
//! Default: `PgLearningStore` (sqlx over Postgres).
//! `AppState` holds an `Arc<dyn LearningStore>`; tests swap in `MemoryStore`.
//!
//! Scoring never happens in SQL. Stores load rows, hand them to the pure
//! functions in `recommendation` / `diagnostic`, and persist the results.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::diagnostic::DiagnosticOutcome;
use crate::errors::AppError;
use crate::models::diagnostic::{DiagnosticAnswer, DiagnosticQuiz};
use crate::models::lesson::{CodingExercise, Lesson, ModulePrerequisite, Question};
use crate::models::progress::UserProgress;
use crate::models::recommendation::LessonRecommendation;
use crate::models::user::User;
use crate::recommendation::ScoredLesson;

pub use postgres::PgLearningStore;

#[async_trait]
pub trait LearningStore: Send + Sync {
    /// All lessons in catalog order (`order`, then id).
    async fn list_lessons(&self) -> Result<Vec<Lesson>, AppError>;

    async fn find_lesson(&self, lesson_id: i32) -> Result<Option<Lesson>, AppError>;

    async fn lesson_questions(&self, lesson_id: i32) -> Result<Vec<Question>, AppError>;

    async fn lesson_exercises(&self, lesson_id: i32) -> Result<Vec<CodingExercise>, AppError>;

    async fn module_prerequisites(&self) -> Result<Vec<ModulePrerequisite>, AppError>;

    async fn find_user(&self, user_id: i32) -> Result<Option<User>, AppError>;

    /// Returns the user with this username, creating it on first sign-in.
    async fn find_or_create_user(&self, username: &str, provider: &str)
        -> Result<User, AppError>;

    async fn user_progress(&self, user_id: i32) -> Result<Vec<UserProgress>, AppError>;

    /// Atomic upsert: keeps the best score, `completed` follows `score`.
    async fn record_progress(
        &self,
        user_id: i32,
        lesson_id: i32,
        score: i32,
    ) -> Result<UserProgress, AppError>;

    /// Deletes the user's recommendations and inserts `picks`, atomically.
    async fn replace_recommendations(
        &self,
        user_id: i32,
        picks: &[ScoredLesson],
    ) -> Result<Vec<LessonRecommendation>, AppError>;

    /// Up to `limit` questions sampled at random.
    async fn sample_diagnostic_quiz(&self, limit: i64) -> Result<Vec<DiagnosticQuiz>, AppError>;

    /// Grades and applies a diagnostic batch as one serialized unit per user:
    /// responses, skill levels and the replacement recommendations commit
    /// together or not at all.
    async fn apply_diagnostic(
        &self,
        user_id: i32,
        answers: &[DiagnosticAnswer],
    ) -> Result<DiagnosticOutcome, AppError>;
}
