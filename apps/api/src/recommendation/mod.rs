// Lesson recommendations: progress-based ranking for GET /api/recommendations
// and skill-based re-derivation after a diagnostic batch.
// Both produce a top-5 shortlist that replaces the learner's stored set.

pub mod engine;
pub mod handlers;
pub mod skill;

use std::collections::HashMap;

use serde::Serialize;

use crate::models::lesson::Lesson;
use crate::models::recommendation::RecommendedLesson;

pub const BASE_SCORE: i32 = 100;
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A lesson with its ranking score. The score may go negative; it is only used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredLesson {
    pub lesson_id: i32,
    pub score: i32,
    pub reason: String,
}

/// Sorts by descending score and keeps the top `MAX_RECOMMENDATIONS`.
/// The sort is stable, so ties keep input order.
pub fn rank(mut candidates: Vec<ScoredLesson>) -> Vec<ScoredLesson> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

/// Joins picks with their catalog rows, keeping rank order.
pub fn attach_lessons(picks: &[ScoredLesson], catalog: &[Lesson]) -> Vec<RecommendedLesson> {
    let by_id: HashMap<i32, &Lesson> = catalog.iter().map(|l| (l.id, l)).collect();
    picks
        .iter()
        .filter_map(|pick| {
            by_id.get(&pick.lesson_id).map(|lesson| RecommendedLesson {
                lesson: (*lesson).clone(),
                recommendation_score: pick.score,
                recommendation_reason: pick.reason.clone(),
            })
        })
        .collect()
}
