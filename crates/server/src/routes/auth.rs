//! Authentication route handlers.
//!
//! Sign-in, sign-up, and sign-out. Provider errors are surfaced inline on
//! the form as message text, passed through the redirect query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub google_enabled: bool,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub google_enabled: bool,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the sign-in page.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
        google_enabled: state.google().is_some(),
    }
}

/// Handle sign-in form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
                tracing::error!("Failed to set session: {}", e);
                return redirect_with_error("/auth/login", "Session error, please try again");
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Sign-in failed: {}", e);
            redirect_with_error("/auth/login", &e.to_string())
        }
    }
}

/// Display the sign-up page.
pub async fn register_page(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error,
        google_enabled: state.google().is_some(),
    }
}

/// Handle sign-up form submission.
///
/// The passwords-match check applies on sign-up only; a new account is
/// signed in immediately.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match AuthService::new(state.pool())
        .register_with_password(&form.email, &form.password, &form.password_confirm)
        .await
    {
        Ok(user) => {
            if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
                tracing::error!("Failed to set session after sign-up: {}", e);
                return redirect_with_error("/auth/login", "Session error, please try again");
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Sign-up failed: {}", e);
            redirect_with_error("/auth/register", &e.to_string())
        }
    }
}

/// Handle sign-out.
///
/// Clears the current user and destroys the session; the gate renders
/// unauthenticated from here on.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/auth/login").into_response()
}

/// Redirect back to a form page with an inline error message.
pub fn redirect_with_error(path: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message))).into_response()
}
