//! Skill-based re-derivation, run after a diagnostic batch.

use std::collections::BTreeMap;

use crate::models::diagnostic::NEUTRAL_SKILL_LEVEL;
use crate::models::lesson::Lesson;
use crate::recommendation::{rank, ScoredLesson, BASE_SCORE};

const LEVEL_GAP_PENALTY: i32 = 20;

/// Scores every catalog lesson by `100 - 20 * |level - difficulty|`, where
/// `level` is the learner's level in the lesson's skill area (neutral when
/// unknown). Completed lessons are not excluded here.
pub fn recommend_from_skills(
    lessons: &[Lesson],
    levels: &BTreeMap<String, i32>,
) -> Vec<ScoredLesson> {
    let candidates = lessons
        .iter()
        .map(|lesson| {
            let level = skill_level_for(lesson, levels);
            ScoredLesson {
                lesson_id: lesson.id,
                score: BASE_SCORE - LEVEL_GAP_PENALTY * (level - lesson.difficulty).abs(),
                reason: format!("Based on your skill assessment in {}", lesson.module),
            }
        })
        .collect();

    rank(candidates)
}

fn skill_level_for(lesson: &Lesson, levels: &BTreeMap<String, i32>) -> i32 {
    lesson
        .skill_area
        .as_deref()
        .and_then(|area| levels.get(area))
        .copied()
        .unwrap_or(NEUTRAL_SKILL_LEVEL)
}
