//! Google OAuth route handlers (federated sign-in).
//!
//! Server-side authorization-code flow:
//! - Login: redirects to Google's consent page
//! - Callback: validates state, exchanges the code, signs the user in

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::set_current_user;
use crate::models::{CurrentUser, session_keys};
use crate::routes::auth::redirect_with_error;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Query parameters from the Google OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code to exchange for tokens.
    pub code: Option<String>,
    /// State parameter for CSRF protection.
    pub state: Option<String>,
    /// Error code if authorization failed.
    pub error: Option<String>,
}

/// Generate a cryptographically secure random string.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            // SAFETY: idx is always within bounds since random_range returns 0..CHARSET.len()
            char::from(*CHARSET.get(idx).expect("idx within bounds"))
        })
        .collect()
}

/// Initiate Google OAuth sign-in.
///
/// Generates a state parameter, stores it in the session, and redirects to
/// Google's consent page.
///
/// # Route
///
/// `GET /auth/google/login`
pub async fn login(State(state): State<AppState>, session: Session) -> Response {
    let Some(google) = state.google() else {
        return redirect_with_error("/auth/login", "Google sign-in is not configured");
    };

    // Generate CSRF state
    let oauth_state = generate_random_string(32);

    if let Err(e) = session
        .insert(session_keys::GOOGLE_OAUTH_STATE, &oauth_state)
        .await
    {
        tracing::error!("Failed to store OAuth state in session: {}", e);
        return redirect_with_error("/auth/login", "Session error, please try again");
    }

    let redirect_uri = format!("{}/auth/google/callback", state.config().base_url);
    let auth_url = google.authorization_url(&redirect_uri, &oauth_state);

    Redirect::to(&auth_url).into_response()
}

/// Handle the Google OAuth callback.
///
/// Validates the state parameter, exchanges the authorization code, fetches
/// the verified profile, and signs the user in.
///
/// # Route
///
/// `GET /auth/google/callback`
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(google) = state.google() else {
        return redirect_with_error("/auth/login", "Google sign-in is not configured");
    };

    // Check for OAuth errors from Google (e.g. the user closed the consent page)
    if let Some(error) = query.error {
        tracing::warn!("Google OAuth error: {}", error);
        return redirect_with_error("/auth/login", "Google sign-in was cancelled");
    }

    let Some(code) = query.code else {
        tracing::warn!("Google OAuth callback missing code");
        return redirect_with_error("/auth/login", "Google sign-in failed");
    };

    // Verify state parameter (CSRF protection)
    let Some(returned_state) = query.state else {
        tracing::warn!("Google OAuth callback missing state");
        return redirect_with_error("/auth/login", "Google sign-in failed");
    };

    let stored_state: Option<String> = session
        .get(session_keys::GOOGLE_OAUTH_STATE)
        .await
        .ok()
        .flatten();

    if stored_state.as_ref() != Some(&returned_state) {
        tracing::warn!("Google OAuth state mismatch");
        return redirect_with_error("/auth/login", "Google sign-in failed");
    }

    // Clear the stored state (one-time use)
    let _ = session
        .remove::<String>(session_keys::GOOGLE_OAUTH_STATE)
        .await;

    // Exchange code for an access token
    let redirect_uri = format!("{}/auth/google/callback", state.config().base_url);
    let access_token = match google.exchange_code(&code, &redirect_uri).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to exchange Google OAuth code: {}", e);
            return redirect_with_error("/auth/login", "Google sign-in failed");
        }
    };

    // Fetch the verified profile
    let identity = match google.fetch_identity(&access_token).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!("Failed to fetch Google identity: {}", e);
            return redirect_with_error("/auth/login", "Google sign-in failed");
        }
    };

    // Create or refresh the local account
    let user = match AuthService::new(state.pool())
        .login_with_google(&identity)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Google sign-in failed: {}", e);
            return redirect_with_error("/auth/login", &e.to_string());
        }
    };

    if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
        tracing::error!("Failed to set session: {}", e);
        return redirect_with_error("/auth/login", "Session error, please try again");
    }

    tracing::info!("Google user authenticated successfully");

    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_string_length_and_charset() {
        let s = generate_random_string(32);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
