use anyhow::{bail, Context, Result};

const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 24 * 7;

/// OAuth client credentials for the Google sign-in flow.
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
    /// Externally visible origin, used to build the OAuth callback URL.
    pub public_base_url: String,
    /// `None` disables the Google sign-in routes.
    pub google: Option<GoogleCredentials>,
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8080,
        };

        let session_ttl_secs = match var("SESSION_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a positive integer")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let google = match (var("GOOGLE_CLIENT_ID"), var("GOOGLE_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GoogleCredentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => bail!("GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET must be set together"),
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            redis_url: require("REDIS_URL")?,
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            app_env: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            google,
            session_ttl_secs,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    pub fn google_redirect_uri(&self) -> String {
        format!("{}/auth/google/callback", self.public_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/learnml"),
        ("REDIS_URL", "redis://localhost"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&REQUIRED).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);
        assert_eq!(config.public_base_url, "http://localhost:8080");
        assert!(config.google.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_database_url_fails() {
        let err = config_from(&[("REDIS_URL", "redis://localhost")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port_fails() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(config_from(&pairs).is_err());
    }

    #[test]
    fn test_google_credentials_must_come_in_pairs() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GOOGLE_CLIENT_ID", "abc"));
        assert!(config_from(&pairs).is_err());

        pairs.push(("GOOGLE_CLIENT_SECRET", "shh"));
        let config = config_from(&pairs).unwrap();
        assert_eq!(config.google.unwrap().client_id, "abc");
    }

    #[test]
    fn test_redirect_uri_strips_trailing_slash() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PUBLIC_BASE_URL", "https://learn.example.com/"));
        let config = config_from(&pairs).unwrap();
        assert_eq!(
            config.google_redirect_uri(),
            "https://learn.example.com/auth/google/callback"
        );
    }
}
