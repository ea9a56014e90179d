use crate::models::progress::UserProgress;

/// Minimum score that marks a lesson as completed.
pub const PASSING_SCORE: i32 = 80;
pub const MAX_SCORE: i32 = 100;

pub fn is_passing(score: i32) -> bool {
    score >= PASSING_SCORE
}

/// Rounds a submitted score to the nearest integer and clamps it to 0–100.
pub fn normalize_score(raw: f64) -> i32 {
    raw.round().clamp(0.0, f64::from(MAX_SCORE)) as i32
}

/// The row state after one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub score: i32,
    pub completed: bool,
}

/// Merges a submission into the stored row: the best score is kept, while
/// `completed` follows the incoming score only. A low retry after a passing
/// attempt therefore clears `completed` even though the stored score stays high.
/// The Postgres upsert in `store::postgres` performs the same merge in SQL.
pub fn apply_attempt(existing: Option<&UserProgress>, incoming: i32) -> ProgressUpdate {
    let score = existing.map_or(incoming, |row| row.score.max(incoming));
    ProgressUpdate {
        score,
        completed: is_passing(incoming),
    }
}
