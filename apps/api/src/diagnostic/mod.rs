// Diagnostic skill assessment: grades a submitted batch, moves per-skill
// levels, and re-derives the learner's recommendations from them.

pub mod assessor;
pub mod handlers;

use crate::models::diagnostic::{UserDiagnosticResponse, UserSkillLevel};
use crate::models::recommendation::LessonRecommendation;

/// Number of questions served per diagnostic session.
pub const QUIZ_SIZE: i64 = 10;

/// What a store persisted for one diagnostic batch.
#[derive(Debug, Clone)]
pub struct DiagnosticOutcome {
    pub responses: Vec<UserDiagnosticResponse>,
    pub skill_levels: Vec<UserSkillLevel>,
    pub recommendations: Vec<LessonRecommendation>,
    /// Quiz ids that did not resolve to a question.
    pub skipped: Vec<i32>,
}
