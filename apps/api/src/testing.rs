//! Fixtures shared by unit and router tests.

use std::sync::Arc;

use chrono::Utc;
use sqlx::types::Json;

use crate::auth::session::MemorySessionStore;
use crate::config::Config;
use crate::models::diagnostic::DiagnosticQuiz;
use crate::models::lesson::{CodingExercise, Lesson, ModulePrerequisite, Question, TestCase};
use crate::models::progress::UserProgress;
use crate::progress::tracker::is_passing;
use crate::state::AppState;
use crate::store::memory::MemoryStore;

pub fn lesson(id: i32, module: &str, difficulty: i32, prerequisites: &[i32]) -> Lesson {
    Lesson {
        id,
        title: format!("Lesson {id}"),
        description: format!("About lesson {id}"),
        difficulty,
        order: id,
        module: module.to_string(),
        lesson_type: "quiz".to_string(),
        skill_area: None,
        prerequisites: prerequisites.to_vec(),
    }
}

pub fn lesson_in_area(id: i32, module: &str, difficulty: i32, skill_area: Option<&str>) -> Lesson {
    Lesson {
        skill_area: skill_area.map(str::to_string),
        ..lesson(id, module, difficulty, &[])
    }
}

pub fn progress(user_id: i32, lesson_id: i32, score: i32) -> UserProgress {
    UserProgress {
        id: lesson_id,
        user_id,
        lesson_id,
        completed: is_passing(score),
        score,
        last_attempted: Utc::now(),
    }
}

pub fn module_prerequisite(module: &str, prerequisite: &str, required: bool) -> ModulePrerequisite {
    ModulePrerequisite {
        id: 1,
        module_id: module.to_string(),
        prerequisite_module_id: prerequisite.to_string(),
        required,
    }
}

pub fn quiz(id: i32, skill_area: &str, correct_answer: &str, weight: i32) -> DiagnosticQuiz {
    DiagnosticQuiz {
        id,
        topic: skill_area.replace('_', " "),
        question: format!("Question {id}?"),
        options: vec![correct_answer.to_string(), "something else".to_string()],
        correct_answer: correct_answer.to_string(),
        difficulty_level: 2,
        skill_area: skill_area.to_string(),
        weight,
    }
}

pub fn question(id: i32, lesson_id: i32) -> Question {
    Question {
        id,
        lesson_id,
        question: "What is Machine Learning?".to_string(),
        options: vec![
            "A programming language".to_string(),
            "The ability of systems to learn from data".to_string(),
        ],
        correct_answer: "The ability of systems to learn from data".to_string(),
        explanation: "Systems improve from experience.".to_string(),
    }
}

pub fn coding_exercise(id: i32, lesson_id: i32) -> CodingExercise {
    CodingExercise {
        id,
        lesson_id,
        title: "NumPy Arrays".to_string(),
        description: "Create a 2x3 array".to_string(),
        initial_code: "def create_array():\n    pass".to_string(),
        solution: "def create_array():\n    return np.random.rand(2, 3)".to_string(),
        test_cases: Json(vec![TestCase {
            test: "create_array().shape == (2, 3)".to_string(),
            message: "Array should be 2x3".to_string(),
        }]),
        hints: vec!["Use np.random.rand()".to_string()],
    }
}

pub fn test_config() -> Config {
    Config::from_vars(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/learnml_test".to_string()),
        "REDIS_URL" => Some("redis://localhost".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// App state over in-memory stores; the session store is returned for issuing logins.
pub fn test_state(store: Arc<MemoryStore>) -> (AppState, Arc<MemorySessionStore>) {
    let sessions = Arc::new(MemorySessionStore::default());
    let state = AppState {
        store,
        sessions: sessions.clone(),
        oauth: None,
        config: test_config(),
    };
    (state, sessions)
}
