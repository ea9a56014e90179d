use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A learner. Federated users are keyed by the e-mail the identity provider reports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub auth_provider: String,
    pub streak: i32,
    pub total_xp: i32,
    pub created_at: DateTime<Utc>,
}
