use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::diagnostic::assessor::plan_batch;
use crate::diagnostic::DiagnosticOutcome;
use crate::errors::AppError;
use crate::models::diagnostic::{
    DiagnosticAnswer, DiagnosticQuiz, UserDiagnosticResponse, UserSkillLevel, DEFAULT_CONFIDENCE,
};
use crate::models::lesson::{CodingExercise, Lesson, ModulePrerequisite, Question};
use crate::models::progress::UserProgress;
use crate::models::recommendation::LessonRecommendation;
use crate::models::user::User;
use crate::progress::tracker::apply_attempt;
use crate::recommendation::ScoredLesson;
use crate::store::LearningStore;

const LESSONS_IN_CATALOG_ORDER: &str = "SELECT * FROM lessons ORDER BY lesson_order, id";

#[derive(Clone)]
pub struct PgLearningStore {
    pool: PgPool,
}

impl PgLearningStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Delete-then-insert inside the caller's transaction.
async fn replace_recommendations_in(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    picks: &[ScoredLesson],
) -> Result<Vec<LessonRecommendation>, AppError> {
    sqlx::query("DELETE FROM lesson_recommendations WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    let mut inserted = Vec::with_capacity(picks.len());
    for pick in picks {
        let row = sqlx::query_as::<_, LessonRecommendation>(
            r#"
            INSERT INTO lesson_recommendations (user_id, lesson_id, score, reason, status)
            VALUES ($1, $2, $3, $4, 'active')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(pick.lesson_id)
        .bind(pick.score)
        .bind(&pick.reason)
        .fetch_one(&mut **tx)
        .await?;
        inserted.push(row);
    }

    Ok(inserted)
}

#[async_trait]
impl LearningStore for PgLearningStore {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, AppError> {
        Ok(sqlx::query_as::<_, Lesson>(LESSONS_IN_CATALOG_ORDER)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_lesson(&self, lesson_id: i32) -> Result<Option<Lesson>, AppError> {
        Ok(
            sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE id = $1")
                .bind(lesson_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn lesson_questions(&self, lesson_id: i32) -> Result<Vec<Question>, AppError> {
        Ok(sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE lesson_id = $1 ORDER BY id",
        )
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn lesson_exercises(&self, lesson_id: i32) -> Result<Vec<CodingExercise>, AppError> {
        Ok(sqlx::query_as::<_, CodingExercise>(
            "SELECT * FROM coding_exercises WHERE lesson_id = $1 ORDER BY id",
        )
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn module_prerequisites(&self) -> Result<Vec<ModulePrerequisite>, AppError> {
        Ok(sqlx::query_as::<_, ModulePrerequisite>(
            "SELECT * FROM module_prerequisites ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_or_create_user(
        &self,
        username: &str,
        provider: &str,
    ) -> Result<User, AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        Ok(sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, auth_provider)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(provider)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn user_progress(&self, user_id: i32) -> Result<Vec<UserProgress>, AppError> {
        Ok(sqlx::query_as::<_, UserProgress>(
            "SELECT * FROM user_progress WHERE user_id = $1 ORDER BY lesson_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn record_progress(
        &self,
        user_id: i32,
        lesson_id: i32,
        score: i32,
    ) -> Result<UserProgress, AppError> {
        // First attempt inserts as-is; the conflict clause applies the same
        // merge as `apply_attempt` against the stored row.
        let first = apply_attempt(None, score);
        let row = sqlx::query_as::<_, UserProgress>(
            r#"
            INSERT INTO user_progress (user_id, lesson_id, score, completed, last_attempted)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (user_id, lesson_id) DO UPDATE SET
                score = GREATEST(user_progress.score, EXCLUDED.score),
                completed = EXCLUDED.completed,
                last_attempted = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .bind(first.score)
        .bind(first.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn replace_recommendations(
        &self,
        user_id: i32,
        picks: &[ScoredLesson],
    ) -> Result<Vec<LessonRecommendation>, AppError> {
        let mut tx = self.pool.begin().await?;
        let rows = replace_recommendations_in(&mut tx, user_id, picks).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn sample_diagnostic_quiz(&self, limit: i64) -> Result<Vec<DiagnosticQuiz>, AppError> {
        Ok(sqlx::query_as::<_, DiagnosticQuiz>(
            "SELECT * FROM diagnostic_quiz ORDER BY random() LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn apply_diagnostic(
        &self,
        user_id: i32,
        answers: &[DiagnosticAnswer],
    ) -> Result<DiagnosticOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent batches for the same user until commit.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(user_id))
            .execute(&mut *tx)
            .await?;

        let quiz_ids: Vec<i32> = answers.iter().map(|a| a.quiz_id).collect();
        let quizzes = sqlx::query_as::<_, DiagnosticQuiz>(
            "SELECT * FROM diagnostic_quiz WHERE id = ANY($1)",
        )
        .bind(&quiz_ids)
        .fetch_all(&mut *tx)
        .await?;

        let current_levels = sqlx::query_as::<_, UserSkillLevel>(
            "SELECT * FROM user_skill_levels WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let lessons = sqlx::query_as::<_, Lesson>(LESSONS_IN_CATALOG_ORDER)
            .fetch_all(&mut *tx)
            .await?;

        let plan = plan_batch(&lessons, &quizzes, &current_levels, answers);

        let mut responses = Vec::with_capacity(plan.assessment.graded.len());
        for graded in &plan.assessment.graded {
            let row = sqlx::query_as::<_, UserDiagnosticResponse>(
                r#"
                INSERT INTO user_diagnostic_responses
                    (user_id, quiz_id, answer, is_correct, response_time)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(graded.quiz_id)
            .bind(&graded.answer)
            .bind(graded.is_correct)
            .bind(graded.response_time)
            .fetch_one(&mut *tx)
            .await?;
            responses.push(row);
        }

        let mut skill_levels = Vec::with_capacity(plan.assessment.updated.len());
        for (skill_area, level) in &plan.assessment.updated {
            let row = sqlx::query_as::<_, UserSkillLevel>(
                r#"
                INSERT INTO user_skill_levels (user_id, skill_area, level, confidence)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id, skill_area) DO UPDATE SET
                    level = EXCLUDED.level,
                    last_updated = now()
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(skill_area)
            .bind(level)
            .bind(DEFAULT_CONFIDENCE)
            .fetch_one(&mut *tx)
            .await?;
            skill_levels.push(row);
        }

        let recommendations =
            replace_recommendations_in(&mut tx, user_id, &plan.recommendations).await?;

        tx.commit().await?;

        info!(
            "Applied diagnostic batch for user {user_id}: {} graded, {} skill areas updated",
            responses.len(),
            skill_levels.len()
        );

        Ok(DiagnosticOutcome {
            responses,
            skill_levels,
            recommendations,
            skipped: plan.assessment.skipped,
        })
    }
}
