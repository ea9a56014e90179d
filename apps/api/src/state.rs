use std::sync::Arc;

use crate::auth::google::GoogleOAuthClient;
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::store::LearningStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence seam. Default: `PgLearningStore`.
    pub store: Arc<dyn LearningStore>,
    /// Session token → user id. Default: `RedisSessionStore`.
    pub sessions: Arc<dyn SessionStore>,
    /// Present only when Google credentials are configured.
    pub oauth: Option<GoogleOAuthClient>,
    pub config: Config,
}
