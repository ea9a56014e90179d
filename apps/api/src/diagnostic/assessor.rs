//! Grades diagnostic answers and moves skill levels.
//!
//! Answers are applied in submission order against a running level per skill
//! area, so a second answer in the same area builds on the first. Levels are
//! clamped to 1–5 after every step.

use std::collections::{BTreeMap, HashMap};

use crate::models::diagnostic::{
    DiagnosticAnswer, DiagnosticQuiz, UserSkillLevel, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL,
    NEUTRAL_SKILL_LEVEL,
};
use crate::models::lesson::Lesson;
use crate::recommendation::skill::recommend_from_skills;
use crate::recommendation::ScoredLesson;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub quiz_id: i32,
    pub answer: String,
    pub is_correct: bool,
    pub response_time: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct Assessment {
    pub graded: Vec<GradedAnswer>,
    pub skipped: Vec<i32>,
    /// Final level of each skill area this batch touched.
    pub updated: BTreeMap<String, i32>,
    /// Every level known for the learner after the batch.
    pub levels: BTreeMap<String, i32>,
}

/// Everything a store must write for one batch.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub assessment: Assessment,
    pub recommendations: Vec<ScoredLesson>,
}

/// Exact, case-sensitive comparison with the stored answer.
pub fn grade(quiz: &DiagnosticQuiz, answer: &str) -> bool {
    answer == quiz.correct_answer
}

pub fn skill_delta(quiz: &DiagnosticQuiz, is_correct: bool) -> i32 {
    if is_correct {
        quiz.weight
    } else {
        -quiz.weight
    }
}

/// Unassessed areas start from the neutral level.
pub fn next_level(current: Option<i32>, delta: i32) -> i32 {
    (current.unwrap_or(NEUTRAL_SKILL_LEVEL) + delta).clamp(MIN_SKILL_LEVEL, MAX_SKILL_LEVEL)
}

pub fn assess(
    quizzes: &[DiagnosticQuiz],
    current_levels: &[UserSkillLevel],
    answers: &[DiagnosticAnswer],
) -> Assessment {
    let by_id: HashMap<i32, &DiagnosticQuiz> = quizzes.iter().map(|q| (q.id, q)).collect();
    let mut assessment = Assessment {
        levels: current_levels
            .iter()
            .map(|s| (s.skill_area.clone(), s.level))
            .collect(),
        ..Assessment::default()
    };

    for answer in answers {
        let Some(quiz) = by_id.get(&answer.quiz_id) else {
            assessment.skipped.push(answer.quiz_id);
            continue;
        };

        let is_correct = grade(quiz, &answer.answer);
        let level = next_level(
            assessment.levels.get(&quiz.skill_area).copied(),
            skill_delta(quiz, is_correct),
        );

        assessment.levels.insert(quiz.skill_area.clone(), level);
        assessment.updated.insert(quiz.skill_area.clone(), level);
        assessment.graded.push(GradedAnswer {
            quiz_id: answer.quiz_id,
            answer: answer.answer.clone(),
            is_correct,
            response_time: answer.response_time,
        });
    }

    assessment
}

/// Grades the batch and derives the replacement recommendation set from the
/// resulting levels.
pub fn plan_batch(
    lessons: &[Lesson],
    quizzes: &[DiagnosticQuiz],
    current_levels: &[UserSkillLevel],
    answers: &[DiagnosticAnswer],
) -> BatchPlan {
    let assessment = assess(quizzes, current_levels, answers);
    let recommendations = recommend_from_skills(lessons, &assessment.levels);
    BatchPlan {
        assessment,
        recommendations,
    }
}
