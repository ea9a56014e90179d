mod auth;
mod catalog;
mod config;
mod db;
mod diagnostic;
mod errors;
mod extractors;
mod models;
mod progress;
mod recommendation;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::google::GoogleOAuthClient;
use crate::auth::session::RedisSessionStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgLearningStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting LearnML API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    let db = create_pool(&config.database_url).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    let oauth = match &config.google {
        Some(google) => {
            let client = GoogleOAuthClient::new(
                google.client_id.clone(),
                google.client_secret.clone(),
                config.google_redirect_uri(),
            )?;
            info!("Google sign-in enabled ({})", config.google_redirect_uri());
            Some(client)
        }
        None => {
            warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set; sign-in routes disabled");
            None
        }
    };

    let state = AppState {
        store: Arc::new(PgLearningStore::new(db)),
        sessions: Arc::new(RedisSessionStore::new(redis, config.session_ttl_secs)),
        oauth,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
