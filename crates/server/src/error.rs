//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Persistence failures render as a full-screen error page rather than a
//! localized banner; for HTMX requests the `HX-Retarget` header forces the
//! swap onto the whole body so the page still ends up replaced.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Full-screen error page.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

/// Application-level error type for the inventory server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed outside a product mutation.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A product mutation failed. The message is the fixed per-operation
    /// text shown to the user; detail lives in `source`.
    #[error("Failed to {op} product")]
    Persistence {
        op: &'static str,
        source: RepositoryError,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a repository failure from a product mutation.
    ///
    /// `op` is the verb for the fixed user-facing message: "add", "update",
    /// or "delete".
    #[must_use]
    pub const fn persistence(op: &'static str, source: RepositoryError) -> Self {
        Self::Persistence { op, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Persistence { .. } | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Persistence { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(_) | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            // The fixed "Failed to <op> product" text; detail stays in logs
            Self::Persistence { .. } => self.to_string(),
            Self::Auth(_) => "Authentication error".to_string(),
            _ => self.to_string(),
        };

        (
            status,
            [("HX-Retarget", "body"), ("HX-Reswap", "innerHTML")],
            ErrorTemplate { message },
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::persistence("add", RepositoryError::NotFound);
        assert_eq!(err.to_string(), "Failed to add product");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::persistence("delete", RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_persistence_messages_are_fixed_per_operation() {
        for op in ["add", "update", "delete"] {
            let err = AppError::persistence(op, RepositoryError::NotFound);
            assert_eq!(err.to_string(), format!("Failed to {op} product"));
        }
    }
}
