//! In-memory `LearningStore` used by the router tests.
//!
//! A single mutex over all tables gives the same all-or-nothing behaviour as
//! the Postgres transactions.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

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

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub lessons: Vec<Lesson>,
    pub questions: Vec<Question>,
    pub exercises: Vec<CodingExercise>,
    pub module_prerequisites: Vec<ModulePrerequisite>,
    pub progress: Vec<UserProgress>,
    pub recommendations: Vec<LessonRecommendation>,
    pub quizzes: Vec<DiagnosticQuiz>,
    pub responses: Vec<UserDiagnosticResponse>,
    pub skill_levels: Vec<UserSkillLevel>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn sorted_lessons(&self) -> Vec<Lesson> {
        let mut lessons = self.lessons.clone();
        lessons.sort_by_key(|l| (l.order, l.id));
        lessons
    }

    fn replace_recommendations(
        &mut self,
        user_id: i32,
        picks: &[ScoredLesson],
    ) -> Vec<LessonRecommendation> {
        self.recommendations.retain(|r| r.user_id != user_id);
        let now = Utc::now();
        let rows: Vec<LessonRecommendation> = picks
            .iter()
            .map(|pick| LessonRecommendation {
                id: self.next_id(),
                user_id,
                lesson_id: pick.lesson_id,
                score: pick.score,
                reason: pick.reason.clone(),
                status: "active".to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        self.recommendations.extend(rows.iter().cloned());
        rows
    }

    pub fn add_user(&mut self, username: &str) -> User {
        let user = User {
            id: self.next_id(),
            username: username.to_string(),
            auth_provider: "google".to_string(),
            streak: 0,
            total_xp: 0,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        user
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new(seed: impl FnOnce(&mut Tables)) -> Self {
        let mut tables = Tables {
            // ids below 1000 are left for fixtures
            next_id: 1000,
            ..Tables::default()
        };
        seed(&mut tables);
        Self {
            tables: Mutex::new(tables),
        }
    }

    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }
}

#[async_trait]
impl LearningStore for MemoryStore {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, AppError> {
        Ok(self.tables().sorted_lessons())
    }

    async fn find_lesson(&self, lesson_id: i32) -> Result<Option<Lesson>, AppError> {
        Ok(self
            .tables()
            .lessons
            .iter()
            .find(|l| l.id == lesson_id)
            .cloned())
    }

    async fn lesson_questions(&self, lesson_id: i32) -> Result<Vec<Question>, AppError> {
        Ok(self
            .tables()
            .questions
            .iter()
            .filter(|q| q.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    async fn lesson_exercises(&self, lesson_id: i32) -> Result<Vec<CodingExercise>, AppError> {
        Ok(self
            .tables()
            .exercises
            .iter()
            .filter(|e| e.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    async fn module_prerequisites(&self) -> Result<Vec<ModulePrerequisite>, AppError> {
        Ok(self.tables().module_prerequisites.clone())
    }

    async fn find_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_or_create_user(
        &self,
        username: &str,
        _provider: &str,
    ) -> Result<User, AppError> {
        let mut tables = self.tables();
        if let Some(user) = tables.users.iter().find(|u| u.username == username) {
            return Ok(user.clone());
        }
        Ok(tables.add_user(username))
    }

    async fn user_progress(&self, user_id: i32) -> Result<Vec<UserProgress>, AppError> {
        let mut rows: Vec<UserProgress> = self
            .tables()
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.lesson_id);
        Ok(rows)
    }

    async fn record_progress(
        &self,
        user_id: i32,
        lesson_id: i32,
        score: i32,
    ) -> Result<UserProgress, AppError> {
        let mut tables = self.tables();
        let position = tables
            .progress
            .iter()
            .position(|p| p.user_id == user_id && p.lesson_id == lesson_id);
        let update = apply_attempt(position.map(|i| &tables.progress[i]), score);

        let row = match position {
            Some(i) => {
                let row = &mut tables.progress[i];
                row.score = update.score;
                row.completed = update.completed;
                row.last_attempted = Utc::now();
                row.clone()
            }
            None => {
                let row = UserProgress {
                    id: tables.next_id(),
                    user_id,
                    lesson_id,
                    completed: update.completed,
                    score: update.score,
                    last_attempted: Utc::now(),
                };
                tables.progress.push(row.clone());
                row
            }
        };
        Ok(row)
    }

    async fn replace_recommendations(
        &self,
        user_id: i32,
        picks: &[ScoredLesson],
    ) -> Result<Vec<LessonRecommendation>, AppError> {
        Ok(self.tables().replace_recommendations(user_id, picks))
    }

    async fn sample_diagnostic_quiz(&self, limit: i64) -> Result<Vec<DiagnosticQuiz>, AppError> {
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self.tables().quizzes.iter().take(take).cloned().collect())
    }

    async fn apply_diagnostic(
        &self,
        user_id: i32,
        answers: &[DiagnosticAnswer],
    ) -> Result<DiagnosticOutcome, AppError> {
        let mut tables = self.tables();
        let current: Vec<UserSkillLevel> = tables
            .skill_levels
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        let plan = plan_batch(&tables.sorted_lessons(), &tables.quizzes, &current, answers);
        let now = Utc::now();

        let mut responses = Vec::new();
        for graded in &plan.assessment.graded {
            let row = UserDiagnosticResponse {
                id: tables.next_id(),
                user_id,
                quiz_id: graded.quiz_id,
                answer: graded.answer.clone(),
                is_correct: graded.is_correct,
                response_time: graded.response_time,
                attempted_at: now,
            };
            tables.responses.push(row.clone());
            responses.push(row);
        }

        let mut skill_levels = Vec::new();
        for (skill_area, level) in &plan.assessment.updated {
            let existing = tables
                .skill_levels
                .iter()
                .position(|s| s.user_id == user_id && &s.skill_area == skill_area);
            let row = match existing {
                Some(i) => {
                    let row = &mut tables.skill_levels[i];
                    row.level = *level;
                    row.last_updated = now;
                    row.clone()
                }
                None => {
                    let row = UserSkillLevel {
                        id: tables.next_id(),
                        user_id,
                        skill_area: skill_area.clone(),
                        level: *level,
                        confidence: DEFAULT_CONFIDENCE,
                        last_updated: now,
                    };
                    tables.skill_levels.push(row.clone());
                    row
                }
            };
            skill_levels.push(row);
        }

        let recommendations = tables.replace_recommendations(user_id, &plan.recommendations);

        Ok(DiagnosticOutcome {
            responses,
            skill_levels,
            recommendations,
            skipped: plan.assessment.skipped,
        })
    }
}
