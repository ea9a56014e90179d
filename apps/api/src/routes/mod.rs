pub mod health;


use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::catalog::handlers as catalog;
use crate::diagnostic::handlers as diagnostic;
use crate::progress::handlers as progress;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/lessons", get(catalog::handle_list_lessons))
        .route("/api/lessons/:id", get(catalog::handle_get_lesson))
        // Learner
        .route(
            "/api/recommendations",
            get(recommendation::handle_get_recommendations),
        )
        .route("/api/progress", get(progress::handle_list_progress))
        .route(
            "/api/progress/:lesson_id",
            post(progress::handle_record_progress),
        )
        .route("/api/diagnostic-quiz", get(diagnostic::handle_get_quiz))
        .route(
            "/api/diagnostic-quiz/submit",
            post(diagnostic::handle_submit),
        )
        // Session
        .route("/api/user", get(auth::handle_current_user))
        .route("/api/logout", post(auth::handle_logout));

    if state.oauth.is_some() {
        router = router
            .route("/auth/google", get(auth::handle_google_login))
            .route("/auth/google/callback", get(auth::handle_google_callback));
    }

    router.with_state(state)
}
