/// Google OAuth 2.0 client for the sign-in flow.
///
/// Only the authorization-code grant is used: build the consent URL, swap the
/// returned code for an access token, read the account e-mail.
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "email profile";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("No email found in Google profile")]
    MissingEmail,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
}

#[derive(Clone)]
pub struct GoogleOAuthClient {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Result<Self, OAuthError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Consent-screen URL carrying the anti-forgery `state`.
    pub fn authorize_url(&self, state: &str) -> Result<String, OAuthError> {
        let request = self
            .client
            .get(AUTHORIZE_URL)
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
            ])
            .build()?;
        Ok(request.url().to_string())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let token: TokenResponse = Self::json_or_error(response).await?;
        debug!("Exchanged authorization code for access token");
        Ok(token.access_token)
    }

    pub async fn fetch_email(&self, access_token: &str) -> Result<String, OAuthError> {
        let response = self
            .client
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        let info: UserInfo = Self::json_or_error(response).await?;
        info.email
            .filter(|email| !email.is_empty())
            .ok_or(OAuthError::MissingEmail)
    }

    async fn json_or_error<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OAuthError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OAuthError::Provider {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_client_and_state() {
        let client = GoogleOAuthClient::new(
            "client-123".to_string(),
            "secret".to_string(),
            "http://localhost:8080/auth/google/callback".to_string(),
        )
        .unwrap();

        let url = client.authorize_url("xyz").unwrap();
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=xyz"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fgoogle%2Fcallback"));
        assert!(!url.contains("secret"));
    }
}
