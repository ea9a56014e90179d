//! Axum route handlers for sign-in, the current user, and logout.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::google::{GoogleOAuthClient, OAuthError};
use crate::auth::{
    removal_cookie, session_cookie, CurrentUser, OAUTH_STATE_COOKIE, SESSION_COOKIE,
};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

const OAUTH_PATH: &str = "/auth/google";
const PROVIDER: &str = "google";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn oauth_client(state: &AppState) -> Result<&GoogleOAuthClient, AppError> {
    state
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Google sign-in is not configured".to_string()))
}

/// GET /auth/google
///
/// Redirects to Google's consent screen. The `state` nonce is kept in a
/// short-lived cookie scoped to the callback.
pub async fn handle_google_login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let client = oauth_client(&state)?;
    let nonce = Uuid::new_v4().simple().to_string();
    let url = client
        .authorize_url(&nonce)
        .map_err(|e| AppError::Internal(e.into()))?;

    let state_cookie = Cookie::build((OAUTH_STATE_COOKIE, nonce))
        .path(OAUTH_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.is_production())
        .build();

    Ok((jar.add(state_cookie), Redirect::to(&url)))
}

/// GET /auth/google/callback
///
/// Provider failures send the browser back to `/` without a session.
/// Store or session failures are server errors.
pub async fn handle_google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), AppError> {
    let client = oauth_client(&state)?;
    let expected = jar
        .get(OAUTH_STATE_COOKIE)
        .map(|c| c.value().to_string());
    let jar = jar.remove(removal_cookie(OAUTH_STATE_COOKIE, OAUTH_PATH));

    let email = match verified_email(client, &params, expected.as_deref()).await {
        Ok(email) => email,
        Err(reason) => {
            warn!("Google sign-in failed: {reason}");
            return Ok((jar, Redirect::to("/")));
        }
    };

    let user = state.store.find_or_create_user(&email, PROVIDER).await?;
    let token = state.sessions.create(user.id).await?;
    info!("User {} signed in via Google", user.id);

    let jar = jar.add(session_cookie(token, state.config.is_production()));
    Ok((jar, Redirect::to("/")))
}

async fn verified_email(
    client: &GoogleOAuthClient,
    params: &CallbackParams,
    expected_state: Option<&str>,
) -> Result<String, String> {
    if let Some(error) = &params.error {
        return Err(format!("provider returned error '{error}'"));
    }
    match (params.state.as_deref(), expected_state) {
        (Some(got), Some(expected)) if got == expected => {}
        _ => return Err("state mismatch".to_string()),
    }
    let code = params
        .code
        .as_deref()
        .ok_or_else(|| "missing authorization code".to_string())?;

    let access_token = client
        .exchange_code(code)
        .await
        .map_err(|e: OAuthError| e.to_string())?;
    client
        .fetch_email(&access_token)
        .await
        .map_err(|e| e.to_string())
}

/// GET /api/user
pub async fn handle_current_user(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

/// POST /api/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    jar: CookieJar,
    current: CurrentUser,
) -> Result<(CookieJar, Json<Value>), AppError> {
    state.sessions.destroy(&current.token).await?;
    info!("User {} logged out", current.user.id);

    let jar = jar.remove(removal_cookie(SESSION_COOKIE, "/"));
    Ok((jar, Json(json!({ "message": "Logout successful" }))))
}
