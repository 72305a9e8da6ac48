//! Google OAuth client for federated sign-in.
//!
//! Authorization-code flow against Google's OAuth 2.0 endpoints:
//!
//! 1. Generate authorization URL with `authorization_url()`
//! 2. Redirect the user to Google's consent page
//! 3. Google redirects back with an authorization code
//! 4. Exchange the code for tokens with `exchange_code()`
//! 5. Fetch the verified profile with `fetch_identity()`

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::GoogleOAuthConfig;

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Errors from the Google OAuth flow.
#[derive(Debug, thiserror::Error)]
pub enum GoogleAuthError {
    /// HTTP transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google rejected the token exchange.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The userinfo response was missing required claims.
    #[error("incomplete identity: {0}")]
    IncompleteIdentity(&'static str),
}

/// A verified identity as reported by Google's userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIdentity {
    /// Stable subject identifier ("sub" claim).
    #[serde(rename = "sub")]
    pub subject: String,
    /// Verified email address.
    pub email: String,
    /// Display name, if the profile scope granted one.
    pub name: Option<String>,
    /// Avatar URL.
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for Google's OAuth 2.0 endpoints.
#[derive(Clone)]
pub struct GoogleClient {
    inner: Arc<GoogleClientInner>,
}

struct GoogleClientInner {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl GoogleClient {
    /// Create a new Google OAuth client.
    #[must_use]
    pub fn new(config: &GoogleOAuthConfig) -> Self {
        Self {
            inner: Arc::new(GoogleClientInner {
                client: reqwest::Client::new(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.expose_secret().to_string(),
            }),
        }
    }

    /// Generate the authorization URL for Google sign-in.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - The callback URL to redirect to after consent
    /// * `state` - A random string stored in the session to prevent CSRF attacks
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{AUTHORIZE_ENDPOINT}?\
            client_id={}&\
            response_type=code&\
            redirect_uri={}&\
            scope=openid%20email%20profile&\
            state={}",
            urlencoding::encode(&self.inner.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state)
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Arguments
    ///
    /// * `code` - The authorization code from the OAuth callback
    /// * `redirect_uri` - The same redirect URI used in the authorization request
    ///
    /// # Errors
    ///
    /// Returns an error if the token exchange fails.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<String, GoogleAuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", &self.inner.client_id),
            ("client_secret", &self.inner.client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .inner
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GoogleAuthError::TokenExchange(text));
        }

        let token: TokenResponse = response.json().await?;

        Ok(token.access_token)
    }

    /// Fetch the signed-in user's verified profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the userinfo request fails or the response lacks
    /// the subject or email claims.
    pub async fn fetch_identity(&self, access_token: &str) -> Result<GoogleIdentity, GoogleAuthError> {
        let identity: GoogleIdentity = self
            .inner
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if identity.subject.is_empty() {
            return Err(GoogleAuthError::IncompleteIdentity("sub"));
        }
        if identity.email.is_empty() {
            return Err(GoogleAuthError::IncompleteIdentity("email"));
        }

        Ok(identity)
    }
}
