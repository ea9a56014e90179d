//! Progress-based lesson scoring.
//!
//! Every lesson starts at `BASE_SCORE` and loses points for a difficulty
//! mismatch with the learner's average score and for unmet per-lesson
//! prerequisites. Completed lessons and lessons in a locked module are never
//! recommended.

use std::collections::HashSet;

use crate::models::lesson::{Lesson, ModulePrerequisite};
use crate::models::progress::UserProgress;
use crate::recommendation::{rank, ScoredLesson, BASE_SCORE};

pub const REASON_MATCHES_LEVEL: &str = "This lesson matches your current skill level";
pub const REASON_PRACTICE_EASIER: &str = "You might want to practice easier lessons first";
pub const REASON_TOO_EASY: &str = "You might find this lesson too easy";
pub const REASON_PREREQUISITES: &str = "Complete prerequisite lessons first";

const STRUGGLING_AVERAGE: f64 = 70.0;
const STRUGGLING_PENALTY: i32 = 20;
const EXCELLING_AVERAGE: f64 = 90.0;
const TOO_EASY_PENALTY: i32 = 10;
const PREREQUISITE_PENALTY: i32 = 40;

/// Ranks the catalog for one learner. `lessons` must be in catalog order;
/// equal scores keep that order.
pub fn recommend_from_progress(
    lessons: &[Lesson],
    progress: &[UserProgress],
    module_prerequisites: &[ModulePrerequisite],
) -> Vec<ScoredLesson> {
    let completed: HashSet<i32> = progress
        .iter()
        .filter(|p| p.completed)
        .map(|p| p.lesson_id)
        .collect();
    let average = average_score(progress);

    let candidates = lessons
        .iter()
        .filter(|lesson| !completed.contains(&lesson.id))
        .filter(|lesson| module_unlocked(lesson, lessons, module_prerequisites, &completed))
        .map(|lesson| score_lesson(lesson, average, &completed))
        .collect();

    rank(candidates)
}

/// Mean of all progress scores; 0 for a learner with no attempts.
pub fn average_score(progress: &[UserProgress]) -> f64 {
    if progress.is_empty() {
        return 0.0;
    }
    let total: i64 = progress.iter().map(|p| i64::from(p.score)).sum();
    total as f64 / progress.len() as f64
}

/// Only the first prerequisite registered for a module is consulted.
fn module_unlocked(
    lesson: &Lesson,
    catalog: &[Lesson],
    module_prerequisites: &[ModulePrerequisite],
    completed: &HashSet<i32>,
) -> bool {
    let Some(prerequisite) = module_prerequisites
        .iter()
        .find(|mp| mp.module_id == lesson.module)
    else {
        return true;
    };

    if !prerequisite.required {
        return true;
    }

    catalog
        .iter()
        .filter(|l| l.module == prerequisite.prerequisite_module_id)
        .all(|l| completed.contains(&l.id))
}

fn score_lesson(lesson: &Lesson, average: f64, completed: &HashSet<i32>) -> ScoredLesson {
    let mut score = BASE_SCORE;
    let mut reason = REASON_MATCHES_LEVEL;

    if average < STRUGGLING_AVERAGE && lesson.difficulty > 1 {
        score -= STRUGGLING_PENALTY;
        reason = REASON_PRACTICE_EASIER;
    } else if average > EXCELLING_AVERAGE && lesson.difficulty == 1 {
        score -= TOO_EASY_PENALTY;
        reason = REASON_TOO_EASY;
    }

    if !lesson.prerequisites.iter().all(|id| completed.contains(id)) {
        score -= PREREQUISITE_PENALTY;
        reason = REASON_PREREQUISITES;
    }

    ScoredLesson {
        lesson_id: lesson.id,
        score,
        reason: reason.to_string(),
    }
}
